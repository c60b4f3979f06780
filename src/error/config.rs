use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the
    /// `.env` file or the process environment.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but does not hold a valid numeric value.
    #[error("Environment variable {name} has invalid value '{value}': {source}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The raw value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Environment variable parsed but holds zero where only positive values make sense.
    ///
    /// Discord IDs are never zero, and a zero burst size would never let a call through.
    #[error("Environment variable {0} must be greater than zero")]
    ZeroValue(String),

    /// Source and target guild point at the same server.
    ///
    /// A run would purge every channel of the source before reading it back.
    #[error("SOURCE_GUILD_ID and TARGET_GUILD_ID must differ (both are {0})")]
    SameGuild(u64),
}
