//! At most one replication run per target guild.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// Registry of per-target-guild run locks.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct ReplicationLocks {
    targets: Arc<RwLock<HashMap<u64, Arc<Mutex<()>>>>>,
}

/// Proof that the holder is the only active run against a target guild.
///
/// Released when dropped, which covers normal completion, early returns, and a
/// panicking run task alike.
pub struct TargetLease {
    target_guild_id: u64,
    _guard: OwnedMutexGuard<()>,
}

impl TargetLease {
    pub fn target_guild_id(&self) -> u64 {
        self.target_guild_id
    }
}

impl ReplicationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lease for `target_guild_id` without waiting.
    ///
    /// # Returns
    /// - `Some(TargetLease)` - No other run holds the target
    /// - `None` - A run against the target is still active
    pub async fn try_acquire(&self, target_guild_id: u64) -> Option<TargetLease> {
        let lock = {
            let mut targets = self.targets.write().await;
            targets.entry(target_guild_id).or_default().clone()
        };

        lock.try_lock_owned().ok().map(|guard| TargetLease {
            target_guild_id,
            _guard: guard,
        })
    }

    #[cfg(test)]
    pub async fn is_running(&self, target_guild_id: u64) -> bool {
        let targets = self.targets.read().await;
        targets
            .get(&target_guild_id)
            .is_some_and(|lock| lock.try_lock().is_err())
    }
}
