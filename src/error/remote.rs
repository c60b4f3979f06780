//! Typed failures of individual remote guild-management calls.
//!
//! Serenity reports every HTTP problem through one large error type. The replication
//! services only care about what kind of failure happened, so calls against
//! [`GuildApi`](crate::api::GuildApi) return a [`RemoteError`] instead.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single remote call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The bot lacks the permission needed for the call (HTTP 401/403).
    #[error("missing permissions: {0}")]
    Authorization(String),

    /// The referenced guild, role, or channel does not exist or is not visible.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote service asked us to slow down.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Delay reported by the remote service
        retry_after: Duration,
    },

    /// Server-side or transport failure that may succeed if repeated.
    #[error("transient failure: {0}")]
    Transient(String),

    /// Any other rejection; repeating the same call will fail again.
    #[error("request rejected: {0}")]
    Permanent(String),
}

/// Coarse classification of a [`RemoteError`], used in logs and run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    Authorization,
    NotFound,
    RateLimited,
    Transient,
    Permanent,
}

impl RemoteError {
    pub fn kind(&self) -> RemoteErrorKind {
        match self {
            Self::Authorization(_) => RemoteErrorKind::Authorization,
            Self::NotFound(_) => RemoteErrorKind::NotFound,
            Self::RateLimited { .. } => RemoteErrorKind::RateLimited,
            Self::Transient(_) => RemoteErrorKind::Transient,
            Self::Permanent(_) => RemoteErrorKind::Permanent,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Run summaries report how many failed items a second run could still pick up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::Transient(_))
    }

    /// Delay the remote service asked for, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Authorization => "authorization",
            Self::NotFound => "not-found",
            Self::RateLimited => "rate-limited",
            Self::Transient => "transient",
            Self::Permanent => "permanent",
        };
        f.write_str(label)
    }
}
