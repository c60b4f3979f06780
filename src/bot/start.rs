use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};
use std::sync::Arc;

use crate::{
    bot::handler::Handler,
    config::Config,
    error::AppError,
    service::{
        rate_limit::{FixedDelay, RateLimiter, TokenBucket},
        replication::{gate::ConfirmationGate, lock::ReplicationLocks},
    },
};

/// Builds the Discord bot client
///
/// Wires the confirmation gate with the configured rate limiter and a fresh set of run
/// locks.
///
/// # Arguments
/// - `config` - Application configuration
///
/// # Returns
/// - `Ok(Client)` if the client was built successfully
/// - `Err(AppError)` if the token is rejected during client construction
pub async fn init_bot(config: &Config) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let limiter = rate_limiter(config);
    let gate = ConfirmationGate::new(
        config.source_guild_id,
        config.target_guild_id,
        limiter,
        ReplicationLocks::new(),
    );

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(gate))
        .await?;

    Ok(client)
}

/// Picks the limiter applied after every mutating call.
///
/// `CLONE_BURST` switches from a fixed pause to a token bucket that allows that many
/// calls back to back and restores one every `CLONE_DELAY_MS`.
fn rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    match config.clone_burst {
        Some(burst) => {
            tracing::info!(
                "Using token bucket rate limiter: burst of {}, one call per {}ms after that",
                burst,
                config.clone_delay.as_millis()
            );
            Arc::new(TokenBucket::new(burst, config.clone_delay))
        }
        None => Arc::new(FixedDelay::new(config.clone_delay)),
    }
}

/// Starts the Discord bot in a blocking manner
///
/// Blocks until the gateway connection shuts down.
///
/// # Arguments
/// - `client` - Client built by [`init_bot`]
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    fn config(clone_burst: Option<u32>) -> Config {
        Config {
            discord_bot_token: "token".to_string(),
            source_guild_id: 1,
            target_guild_id: 2,
            clone_delay: Duration::from_secs(1),
            clone_burst,
        }
    }

    /// Tests the default fixed-delay limiter.
    ///
    /// Expected: every call waits the configured delay
    #[tokio::test(start_paused = true)]
    async fn fixed_delay_without_burst() {
        let limiter = rate_limiter(&config(None));
        let started = Instant::now();

        for _ in 0..3 {
            limiter.throttle().await;
        }

        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    /// Tests selecting the token bucket through the burst setting.
    ///
    /// Expected: the burst passes immediately, the next call waits one delay
    #[tokio::test(start_paused = true)]
    async fn token_bucket_with_burst() {
        let limiter = rate_limiter(&config(Some(2)));
        let started = Instant::now();

        limiter.throttle().await;
        limiter.throttle().await;
        assert_eq!(started.elapsed(), Duration::ZERO);

        limiter.throttle().await;
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }
}
