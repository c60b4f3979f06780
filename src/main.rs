mod api;
mod bot;
mod config;
mod error;
mod model;
mod service;
mod util;

use dioxus_logger::tracing::{self, Level};

use crate::{bot::start, config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = Config::from_env()?;

    tracing::info!(
        "Cloning from source guild {} to target guild {} with {}ms between changes",
        config.source_guild_id,
        config.target_guild_id,
        config.clone_delay.as_millis()
    );

    let client = start::init_bot(&config).await?;
    start::start_bot(client).await?;

    Ok(())
}
