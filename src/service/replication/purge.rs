//! Target purge.
//!
//! Removes every channel and category from the target guild so channel replication
//! starts from an empty tree. Without it, each run would stack another copy of the
//! source structure on top of the previous one.

use dioxus_logger::tracing;

use crate::{
    api::GuildApi,
    model::{
        guild::GuildSnapshot,
        summary::{Phase, ReplicationSummary},
    },
    service::rate_limit::RateLimiter,
};

pub struct TargetPurgeService<'a> {
    api: &'a dyn GuildApi,
    limiter: &'a dyn RateLimiter,
}

impl<'a> TargetPurgeService<'a> {
    pub fn new(api: &'a dyn GuildApi, limiter: &'a dyn RateLimiter) -> Self {
        Self { api, limiter }
    }

    /// Deletes every channel of `target`, then every category.
    ///
    /// Each deletion is independent: a failure is logged and recorded and the remaining
    /// channels are still deleted.
    pub async fn purge(&self, target: &GuildSnapshot, summary: &mut ReplicationSummary) {
        tracing::info!("Deleting existing channels in target server...");

        for (channel_id, name) in target.all_channel_ids() {
            let result = self.api.delete_channel(channel_id).await;
            self.limiter.throttle().await;

            match result {
                Ok(()) => {
                    tracing::info!("Deleted channel: #{}", name);
                    summary.channels_deleted += 1;
                }
                Err(e) => {
                    if let Some(retry_after) = e.retry_after() {
                        self.limiter.back_off(retry_after).await;
                    }
                    tracing::error!("Could not delete channel #{} ({}): {}", name, e.kind(), e);
                    summary.record_failure(Phase::Purge, name, e);
                }
            }
        }
    }
}
