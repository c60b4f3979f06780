//! Category and channel replication.
//!
//! Recreates the source guild's channel tree in the target guild. Each category is
//! created before its channels so they can be nested under it. Permission overwrites are
//! translated into the target namespace through the [`IdentifierMap`] built by role
//! replication; overwrites that cannot be translated are dropped.

use dioxus_logger::tracing;

use crate::{
    api::GuildApi,
    error::remote::RemoteError,
    model::{
        guild::{
            CategorySnapshot, ChannelKind, ChannelSnapshot, GuildSnapshot, OverwriteSubject,
            PermissionOverwrite,
        },
        identifier_map::IdentifierMap,
        params::{CreateCategoryParams, CreateTextChannelParams, CreateVoiceChannelParams},
        summary::{Phase, ReplicationSummary},
    },
    service::rate_limit::RateLimiter,
};

/// Translates overwrites into the target guild's role namespace.
///
/// Member overwrites and overwrites for roles without a mapping (managed or failed roles)
/// are dropped. Order of the remaining overwrites is preserved.
pub fn remap_overwrites(
    overwrites: &[PermissionOverwrite],
    role_map: &IdentifierMap,
) -> Vec<PermissionOverwrite> {
    overwrites
        .iter()
        .filter_map(|overwrite| match overwrite.subject {
            OverwriteSubject::Role(source_role_id) => {
                role_map
                    .target_for(source_role_id)
                    .map(|target_role_id| PermissionOverwrite {
                        subject: OverwriteSubject::Role(target_role_id),
                        allow: overwrite.allow,
                        deny: overwrite.deny,
                    })
            }
            OverwriteSubject::Member(_) => None,
        })
        .collect()
}

pub struct ChannelTreeService<'a> {
    api: &'a dyn GuildApi,
    limiter: &'a dyn RateLimiter,
}

impl<'a> ChannelTreeService<'a> {
    pub fn new(api: &'a dyn GuildApi, limiter: &'a dyn RateLimiter) -> Self {
        Self { api, limiter }
    }

    /// Clones categories and channels of `source` into the target guild.
    ///
    /// Uncategorized channels are created first, then each category followed by its
    /// channels. If a category cannot be created its channels are dropped rather than
    /// created at the top level. Channels other than text and voice are skipped.
    ///
    /// # Arguments
    /// - `source` - Snapshot of the guild being copied
    /// - `target_guild_id` - Guild receiving the channels
    /// - `role_map` - Source-to-target role mapping from role replication
    /// - `summary` - Run summary receiving counts and per-item failures
    pub async fn replicate(
        &self,
        source: &GuildSnapshot,
        target_guild_id: u64,
        role_map: &IdentifierMap,
        summary: &mut ReplicationSummary,
    ) {
        for (category, channels) in source.by_category() {
            let category_id = match category {
                Some(category) => {
                    match self
                        .create_category(target_guild_id, category, role_map, summary)
                        .await
                    {
                        Some(category_id) => Some(category_id),
                        None => {
                            tracing::warn!(
                                "Dropping {} channel(s) of category {} since it could not be created",
                                channels.len(),
                                category.name
                            );
                            summary.orphaned_channels_dropped += channels.len();
                            continue;
                        }
                    }
                }
                None => None,
            };

            let category_name = category.map(|c| c.name.as_str()).unwrap_or("None");

            for channel in channels {
                self.create_channel(
                    target_guild_id,
                    channel,
                    category_id,
                    category_name,
                    role_map,
                    summary,
                )
                .await;
            }
        }
    }

    async fn create_category(
        &self,
        target_guild_id: u64,
        category: &CategorySnapshot,
        role_map: &IdentifierMap,
        summary: &mut ReplicationSummary,
    ) -> Option<u64> {
        tracing::info!("Creating category: {}", category.name);

        let params = CreateCategoryParams {
            name: category.name.clone(),
            overwrites: remap_overwrites(&category.overwrites, role_map),
        };

        let result = self.api.create_category(target_guild_id, &params).await;
        self.limiter.throttle().await;

        match result {
            Ok(category_id) => {
                summary.categories_created += 1;
                Some(category_id)
            }
            Err(e) => {
                if let Some(retry_after) = e.retry_after() {
                    self.limiter.back_off(retry_after).await;
                }
                tracing::error!(
                    "Failed to create category {} ({}): {}",
                    category.name,
                    e.kind(),
                    e
                );
                summary.record_failure(Phase::Channels, &category.name, e);
                None
            }
        }
    }

    async fn create_channel(
        &self,
        target_guild_id: u64,
        channel: &ChannelSnapshot,
        category_id: Option<u64>,
        category_name: &str,
        role_map: &IdentifierMap,
        summary: &mut ReplicationSummary,
    ) {
        let overwrites = remap_overwrites(&channel.overwrites, role_map);

        let result: Result<u64, RemoteError> = match &channel.kind {
            ChannelKind::Text {
                topic,
                slow_mode,
                nsfw,
            } => {
                tracing::info!(
                    "Creating channel: #{} in category: {}",
                    channel.name,
                    category_name
                );
                let params = CreateTextChannelParams {
                    name: channel.name.clone(),
                    topic: topic.clone(),
                    slow_mode: *slow_mode,
                    nsfw: *nsfw,
                    category_id,
                    overwrites,
                };
                self.api.create_text_channel(target_guild_id, &params).await
            }
            ChannelKind::Voice {
                user_limit,
                bitrate,
            } => {
                tracing::info!(
                    "Creating channel: #{} in category: {}",
                    channel.name,
                    category_name
                );
                let params = CreateVoiceChannelParams {
                    name: channel.name.clone(),
                    user_limit: *user_limit,
                    bitrate: *bitrate,
                    category_id,
                    overwrites,
                };
                self.api.create_voice_channel(target_guild_id, &params).await
            }
            ChannelKind::Other => {
                tracing::debug!("Skipping unsupported channel #{}", channel.name);
                summary.unsupported_channels_skipped += 1;
                return;
            }
        };

        self.limiter.throttle().await;

        match result {
            Ok(_) => summary.channels_created += 1,
            Err(e) => {
                if let Some(retry_after) = e.retry_after() {
                    self.limiter.back_off(retry_after).await;
                }
                tracing::error!(
                    "Failed to create channel {} ({}): {}",
                    channel.name,
                    e.kind(),
                    e
                );
                summary.record_failure(Phase::Channels, &channel.name, e);
            }
        }
    }
}
