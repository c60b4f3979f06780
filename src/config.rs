use std::time::Duration;

use crate::{
    error::config::ConfigError,
    util::parse::{parse_u32_from_string, parse_u64_from_string, require_non_zero},
};

/// Delay inserted after every mutating call when `CLONE_DELAY_MS` is unset.
const DEFAULT_CLONE_DELAY_MS: u64 = 1000;

pub struct Config {
    pub discord_bot_token: String,

    pub source_guild_id: u64,
    pub target_guild_id: u64,

    pub clone_delay: Duration,
    /// Burst size of the token bucket limiter; `None` keeps the fixed delay.
    pub clone_burst: Option<u32>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` passes the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let guild_id = |name: &str| {
            let id = parse_u64_from_string(name, required(name)?)?;
            require_non_zero(name, id)
        };

        let discord_bot_token = required("DISCORD_BOT_TOKEN")?;
        let source_guild_id = guild_id("SOURCE_GUILD_ID")?;
        let target_guild_id = guild_id("TARGET_GUILD_ID")?;

        if source_guild_id == target_guild_id {
            return Err(ConfigError::SameGuild(source_guild_id));
        }

        let clone_delay_ms = match lookup("CLONE_DELAY_MS") {
            Some(value) => parse_u64_from_string("CLONE_DELAY_MS", value)?,
            None => DEFAULT_CLONE_DELAY_MS,
        };

        let clone_burst = match lookup("CLONE_BURST") {
            Some(value) => Some(require_non_zero(
                "CLONE_BURST",
                parse_u32_from_string("CLONE_BURST", value)?,
            )?),
            None => None,
        };

        Ok(Self {
            discord_bot_token,
            source_guild_id,
            target_guild_id,
            clone_delay: Duration::from_millis(clone_delay_ms),
            clone_burst,
        })
    }
}
