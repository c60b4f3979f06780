//! The confirmation gate in front of the replication engine.
//!
//! A run destroys every channel of the target guild, so it only starts when invoked from
//! the source guild with an explicit `CONFIRM` token, and only when no other run is
//! active against the same target.

use dioxus_logger::tracing;
use std::sync::Arc;

use crate::{
    api::GuildApi,
    error::{gate::GateRejection, replication::ReplicationError},
    model::summary::ReplicationSummary,
    service::{
        rate_limit::RateLimiter,
        replication::{
            lock::{ReplicationLocks, TargetLease},
            ReplicationEngine,
        },
    },
};

/// Token the caller must supply, compared case-insensitively.
pub const CONFIRMATION_TOKEN: &str = "CONFIRM";

/// Validates the invocation context without touching any remote state.
///
/// # Arguments
/// - `source_guild_id` - The configured source guild
/// - `origin_guild_id` - Guild the command was invoked in, `None` for direct messages
/// - `confirmation` - Free-text token supplied by the caller
///
/// # Returns
/// - `Ok(())` - Invoked from the source guild with a matching token
/// - `Err(GateRejection::WrongGuild)` - Invoked anywhere else
/// - `Err(GateRejection::NotConfirmed)` - Token does not case-fold to `CONFIRM`
pub fn check_invocation(
    source_guild_id: u64,
    origin_guild_id: Option<u64>,
    confirmation: &str,
) -> Result<(), GateRejection> {
    if origin_guild_id != Some(source_guild_id) {
        return Err(GateRejection::WrongGuild);
    }

    if confirmation.to_uppercase() != CONFIRMATION_TOKEN {
        return Err(GateRejection::NotConfirmed);
    }

    Ok(())
}

/// Accepts or rejects `/clone` invocations.
///
/// Cheap to clone; clones share the same run locks.
#[derive(Clone)]
pub struct ConfirmationGate {
    source_guild_id: u64,
    target_guild_id: u64,
    limiter: Arc<dyn RateLimiter>,
    locks: ReplicationLocks,
}

impl ConfirmationGate {
    pub fn new(
        source_guild_id: u64,
        target_guild_id: u64,
        limiter: Arc<dyn RateLimiter>,
        locks: ReplicationLocks,
    ) -> Self {
        Self {
            source_guild_id,
            target_guild_id,
            limiter,
            locks,
        }
    }

    pub fn source_guild_id(&self) -> u64 {
        self.source_guild_id
    }

    /// Checks an invocation and, if accepted, prepares the run.
    ///
    /// No remote call is made here, so the caller can acknowledge the invocation before
    /// the long-running [`AcceptedRun::execute`] starts.
    ///
    /// # Arguments
    /// - `api` - Remote API the run will use
    /// - `origin_guild_id` - Guild the command was invoked in
    /// - `confirmation` - Free-text confirmation token
    ///
    /// # Returns
    /// - `Ok(AcceptedRun)` - Holding the target's run lease
    /// - `Err(GateRejection)` - Rejected, nothing started
    pub async fn accept(
        &self,
        api: Arc<dyn GuildApi>,
        origin_guild_id: Option<u64>,
        confirmation: &str,
    ) -> Result<AcceptedRun, GateRejection> {
        if let Err(rejection) = check_invocation(self.source_guild_id, origin_guild_id, confirmation)
        {
            tracing::warn!(
                "Rejected clone invocation from guild {:?}: {}",
                origin_guild_id,
                rejection
            );
            return Err(rejection);
        }

        let Some(lease) = self.locks.try_acquire(self.target_guild_id).await else {
            tracing::warn!(
                "Rejected clone invocation: target guild {} is already being replicated",
                self.target_guild_id
            );
            return Err(GateRejection::AlreadyRunning);
        };

        let engine = ReplicationEngine::new(
            api,
            self.limiter.clone(),
            self.source_guild_id,
            self.target_guild_id,
        );

        Ok(AcceptedRun { engine, lease })
    }
}

/// A run that passed the gate and holds the target's lease.
pub struct AcceptedRun {
    engine: ReplicationEngine,
    lease: TargetLease,
}

impl AcceptedRun {
    /// Runs the engine to completion, then releases the lease.
    pub async fn execute(self) -> Result<ReplicationSummary, ReplicationError> {
        let Self { engine, lease } = self;

        tracing::info!(
            "Clone process initiated for target guild {}",
            lease.target_guild_id()
        );
        let result = engine.run().await;

        drop(lease);
        result
    }
}
