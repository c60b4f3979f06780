//! Terminal report of a replication run.

use std::fmt;
use std::time::Duration;

use crate::error::remote::RemoteError;

/// Phase of a run in which an item failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Roles,
    Purge,
    Channels,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Roles => "roles",
            Self::Purge => "purge",
            Self::Channels => "channels",
        };
        f.write_str(label)
    }
}

/// A single remote call that failed and whose item was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub phase: Phase,
    /// Display name of the role, category, or channel involved.
    pub name: String,
    pub error: RemoteError,
}

/// Counts and failures collected over one run.
///
/// A run with failures is still a completed run; the summary exists so partial results
/// can be diagnosed from the logs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplicationSummary {
    pub default_role_updated: bool,
    pub roles_created: usize,
    pub managed_roles_skipped: usize,
    pub channels_deleted: usize,
    pub categories_created: usize,
    pub channels_created: usize,
    /// Channels of a kind other than text or voice.
    pub unsupported_channels_skipped: usize,
    /// Channels not created because their category failed to be created.
    pub orphaned_channels_dropped: usize,
    pub failures: Vec<ItemFailure>,
    pub elapsed: Duration,
}

impl ReplicationSummary {
    pub fn record_failure(&mut self, phase: Phase, name: &str, error: RemoteError) {
        self.failures.push(ItemFailure {
            phase,
            name: name.to_string(),
            error,
        });
    }

    pub fn failures_in(&self, phase: Phase) -> usize {
        self.failures.iter().filter(|f| f.phase == phase).count()
    }

    /// Failures that may succeed on a later run (rate limits, server errors).
    pub fn retryable_failures(&self) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.error.is_retryable())
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.orphaned_channels_dropped == 0
    }
}

impl fmt::Display for ReplicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "roles: {} created, {} managed skipped, {} failed; \
             purge: {} deleted, {} failed; \
             channels: {} categories, {} channels created, {} unsupported, {} dropped, {} failed; \
             {} retryable; took {:.1?}",
            self.roles_created,
            self.managed_roles_skipped,
            self.failures_in(Phase::Roles),
            self.channels_deleted,
            self.failures_in(Phase::Purge),
            self.categories_created,
            self.channels_created,
            self.unsupported_channels_skipped,
            self.orphaned_channels_dropped,
            self.failures_in(Phase::Channels),
            self.retryable_failures(),
            self.elapsed,
        )
    }
}
