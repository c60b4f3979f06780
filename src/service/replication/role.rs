//! Role replication.
//!
//! Recreates the source guild's roles in the target guild and records which target role
//! stands in for each source role. The resulting [`IdentifierMap`] is the only input
//! channel replication needs to translate permission overwrites.

use dioxus_logger::tracing;

use crate::{
    api::GuildApi,
    model::{
        guild::{GuildSnapshot, RoleSnapshot},
        identifier_map::IdentifierMap,
        params::CreateRoleParams,
        summary::{Phase, ReplicationSummary},
    },
    service::rate_limit::RateLimiter,
};

/// Display name used for the default role in logs and failures.
const DEFAULT_ROLE_NAME: &str = "@everyone";

pub struct RoleReplicationService<'a> {
    api: &'a dyn GuildApi,
    limiter: &'a dyn RateLimiter,
}

impl<'a> RoleReplicationService<'a> {
    pub fn new(api: &'a dyn GuildApi, limiter: &'a dyn RateLimiter) -> Self {
        Self { api, limiter }
    }

    /// Clones every role of `source` into `target`.
    ///
    /// The default role is never created: the target's own default role is reused, its
    /// permissions are overwritten with the source's, and the mapping is recorded even if
    /// that edit fails. Managed roles are skipped. Every other role is created in
    /// ascending position order; a failed creation skips the role without retrying.
    ///
    /// Creation order approximates the source hierarchy; the resulting positions in the
    /// target are not verified.
    ///
    /// # Arguments
    /// - `source` - Snapshot of the guild being copied
    /// - `target` - Snapshot of the guild receiving the roles
    /// - `summary` - Run summary receiving counts and per-role failures
    ///
    /// # Returns
    /// - `IdentifierMap` - One entry per created role plus the default role
    pub async fn replicate(
        &self,
        source: &GuildSnapshot,
        target: &GuildSnapshot,
        summary: &mut ReplicationSummary,
    ) -> IdentifierMap {
        let mut role_map = IdentifierMap::new();

        self.replicate_default_role(source, target, &mut role_map, summary)
            .await;

        for role in source.roles_by_position() {
            if role.is_default {
                continue;
            }

            if role.is_managed {
                tracing::warn!("Skipping managed role: {}", role.name);
                summary.managed_roles_skipped += 1;
                continue;
            }

            if let Some(target_role_id) = self.create_role(target.guild_id, role, summary).await {
                role_map.insert(role.role_id, target_role_id);
            }
        }

        for (source_role_id, target_role_id) in role_map.iter() {
            tracing::debug!("Role {} maps to {}", source_role_id, target_role_id);
        }

        role_map
    }

    async fn replicate_default_role(
        &self,
        source: &GuildSnapshot,
        target: &GuildSnapshot,
        role_map: &mut IdentifierMap,
        summary: &mut ReplicationSummary,
    ) {
        role_map.insert(source.default_role_id(), target.default_role_id());
        tracing::info!("Mapped {} role", DEFAULT_ROLE_NAME);

        let Some(everyone) = source.default_role() else {
            tracing::warn!(
                "Source guild {} has no {} role in its snapshot, permissions not copied",
                source.guild_id,
                DEFAULT_ROLE_NAME
            );
            return;
        };

        match self
            .api
            .edit_default_role_permissions(target.guild_id, everyone.permissions)
            .await
        {
            Ok(()) => {
                tracing::info!("Updated permissions for {} role", DEFAULT_ROLE_NAME);
                summary.default_role_updated = true;
            }
            Err(e) => {
                if let Some(retry_after) = e.retry_after() {
                    self.limiter.back_off(retry_after).await;
                }
                tracing::error!(
                    "Failed to update permissions for {} role ({}): {}",
                    DEFAULT_ROLE_NAME,
                    e.kind(),
                    e
                );
                summary.record_failure(Phase::Roles, DEFAULT_ROLE_NAME, e);
            }
        }

        self.limiter.throttle().await;
    }

    async fn create_role(
        &self,
        target_guild_id: u64,
        role: &RoleSnapshot,
        summary: &mut ReplicationSummary,
    ) -> Option<u64> {
        tracing::info!("Creating role: {}", role.name);

        let params = CreateRoleParams {
            name: role.name.clone(),
            permissions: role.permissions,
            color: role.color,
            hoist: role.hoist,
            mentionable: role.mentionable,
        };

        let result = self.api.create_role(target_guild_id, &params).await;
        self.limiter.throttle().await;

        match result {
            Ok(target_role_id) => {
                summary.roles_created += 1;
                Some(target_role_id)
            }
            Err(e) => {
                if let Some(retry_after) = e.retry_after() {
                    self.limiter.back_off(retry_after).await;
                }
                tracing::error!(
                    "Failed to create role {} ({}): {}",
                    role.name,
                    e.kind(),
                    e
                );
                summary.record_failure(Phase::Roles, &role.name, e);
                None
            }
        }
    }
}
