//! Error types for the bot process and the replication run.
//!
//! `AppError` is the top-level error returned from start-up code. Everything that can
//! go wrong during a replication run is expressed with the narrower types in the
//! submodules so the run can decide per item whether to skip, retry, or abort.

pub mod config;
pub mod gate;
pub mod remote;
pub mod replication;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Only start-up failures surface here: configuration loading and the serenity client
/// itself. Replication failures never escape the spawned run task.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
