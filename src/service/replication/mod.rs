//! Guild replication run.
//!
//! Copies the structure of the source guild onto the target guild in four fixed phases:
//!
//! 1. **Resolve** - Fetch snapshots of both guilds; the only phase that can abort a run
//! 2. **Roles** (`role`) - Recreate roles and build the source-to-target role map
//! 3. **Purge** (`purge`) - Delete every existing channel and category in the target
//! 4. **Channels** (`channel`) - Recreate categories and channels with translated overwrites
//!
//! Every mutating call is followed by a [`RateLimiter`] pause. Per-item failures are
//! logged, collected in the [`ReplicationSummary`], and never stop the run; there is no
//! rollback, so a run may leave the target partially replicated.
//!
//! Runs are started through the [`ConfirmationGate`](gate::ConfirmationGate), which also
//! guarantees that at most one run per target guild is active at a time.

pub mod channel;
pub mod gate;
pub mod lock;
pub mod purge;
pub mod role;

#[cfg(test)]
mod test;

use dioxus_logger::tracing;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    api::GuildApi,
    error::replication::ReplicationError,
    model::{guild::GuildSnapshot, summary::ReplicationSummary},
    service::rate_limit::RateLimiter,
};

use self::{channel::ChannelTreeService, purge::TargetPurgeService, role::RoleReplicationService};

/// Drives one replication run from the source guild to the target guild.
pub struct ReplicationEngine {
    /// Remote guild-management API
    api: Arc<dyn GuildApi>,
    /// Throttle applied after every mutating call
    limiter: Arc<dyn RateLimiter>,
    source_guild_id: u64,
    target_guild_id: u64,
}

impl ReplicationEngine {
    pub fn new(
        api: Arc<dyn GuildApi>,
        limiter: Arc<dyn RateLimiter>,
        source_guild_id: u64,
        target_guild_id: u64,
    ) -> Self {
        Self {
            api,
            limiter,
            source_guild_id,
            target_guild_id,
        }
    }

    /// Runs all phases once.
    ///
    /// Both guilds are resolved before any mutating call. After that every phase runs to
    /// completion regardless of failures in earlier phases.
    ///
    /// # Returns
    /// - `Ok(ReplicationSummary)` - The run completed, possibly with per-item failures
    /// - `Err(ReplicationError::GuildUnavailable)` - Source or target could not be resolved;
    ///   nothing was modified
    pub async fn run(&self) -> Result<ReplicationSummary, ReplicationError> {
        let started = Instant::now();

        let source = self.resolve(self.source_guild_id).await?;
        let target = self.resolve(self.target_guild_id).await?;

        tracing::info!(
            "Starting clone from '{}' to '{}'",
            source.name,
            target.name
        );

        let api = self.api.as_ref();
        let limiter = self.limiter.as_ref();
        let mut summary = ReplicationSummary::default();

        tracing::info!("--- Cloning Roles ---");
        let role_map = RoleReplicationService::new(api, limiter)
            .replicate(&source, &target, &mut summary)
            .await;
        tracing::info!(
            "--- Role cloning complete, {} role(s) mapped ---",
            role_map.len()
        );

        tracing::info!("--- Cloning Channels ---");
        TargetPurgeService::new(api, limiter)
            .purge(&target, &mut summary)
            .await;

        ChannelTreeService::new(api, limiter)
            .replicate(&source, target.guild_id, &role_map, &mut summary)
            .await;
        tracing::info!("--- Channel cloning complete ---");

        summary.elapsed = started.elapsed();

        if summary.is_clean() {
            tracing::info!("Cloning process finished: {}", summary);
        } else {
            tracing::warn!("Cloning process finished with errors: {}", summary);
        }

        Ok(summary)
    }

    async fn resolve(&self, guild_id: u64) -> Result<GuildSnapshot, ReplicationError> {
        self.api.fetch_guild(guild_id).await.map_err(|source| {
            tracing::error!(
                "Error: Bot is not in guild {} or the ID is incorrect: {}",
                guild_id,
                source
            );
            ReplicationError::GuildUnavailable { guild_id, source }
        })
    }
}
