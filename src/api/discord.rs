//! Serenity-backed implementation of [`GuildApi`].
//!
//! Translates between serenity's models and the run-scoped snapshot models, and maps
//! serenity's error type onto [`RemoteError`] by HTTP status.

use serenity::all::{
    ChannelId, ChannelType, Colour, CreateChannel, EditRole, GuildChannel, GuildId,
    PermissionOverwrite as SerenityOverwrite, PermissionOverwriteType, Permissions, Role, RoleId,
    UserId,
};
use serenity::async_trait;
use serenity::http::Http;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::GuildApi,
    error::remote::RemoteError,
    model::{
        guild::{
            CategorySnapshot, ChannelKind, ChannelSnapshot, GuildSnapshot, OverwriteSubject,
            PermissionOverwrite, RoleSnapshot,
        },
        params::{
            CreateCategoryParams, CreateRoleParams, CreateTextChannelParams,
            CreateVoiceChannelParams,
        },
    },
};

/// Delay assumed when Discord answers 429 and serenity does not surface the header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

/// Guild-management API backed by the bot's Discord HTTP client.
#[derive(Clone)]
pub struct DiscordGuildApi {
    /// Discord HTTP client shared with the gateway client
    http: Arc<Http>,
}

impl DiscordGuildApi {
    /// Creates a new DiscordGuildApi instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl GuildApi for DiscordGuildApi {
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSnapshot, RemoteError> {
        let id = GuildId::new(guild_id);

        let guild = id
            .to_partial_guild(&self.http)
            .await
            .map_err(classify_error)?;
        let channels = id.channels(&self.http).await.map_err(classify_error)?;

        Ok(snapshot_from_parts(
            guild_id,
            &guild.name,
            guild.roles.values(),
            channels.values(),
        ))
    }

    async fn edit_default_role_permissions(
        &self,
        guild_id: u64,
        permissions: u64,
    ) -> Result<(), RemoteError> {
        let id = GuildId::new(guild_id);
        let builder = EditRole::new().permissions(Permissions::from_bits_truncate(permissions));

        id.edit_role(&self.http, id.everyone_role(), builder)
            .await
            .map_err(classify_error)?;

        Ok(())
    }

    async fn create_role(
        &self,
        guild_id: u64,
        params: &CreateRoleParams,
    ) -> Result<u64, RemoteError> {
        let builder = EditRole::new()
            .name(params.name.as_str())
            .permissions(Permissions::from_bits_truncate(params.permissions))
            .colour(Colour::new(params.color))
            .hoist(params.hoist)
            .mentionable(params.mentionable);

        let role = GuildId::new(guild_id)
            .create_role(&self.http, builder)
            .await
            .map_err(classify_error)?;

        Ok(role.id.get())
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), RemoteError> {
        ChannelId::new(channel_id)
            .delete(&self.http)
            .await
            .map_err(classify_error)?;

        Ok(())
    }

    async fn create_category(
        &self,
        guild_id: u64,
        params: &CreateCategoryParams,
    ) -> Result<u64, RemoteError> {
        let builder = CreateChannel::new(params.name.as_str())
            .kind(ChannelType::Category)
            .permissions(to_serenity_overwrites(&params.overwrites));

        self.create_channel(guild_id, builder).await
    }

    async fn create_text_channel(
        &self,
        guild_id: u64,
        params: &CreateTextChannelParams,
    ) -> Result<u64, RemoteError> {
        let mut builder = CreateChannel::new(params.name.as_str())
            .kind(ChannelType::Text)
            .rate_limit_per_user(params.slow_mode)
            .nsfw(params.nsfw)
            .permissions(to_serenity_overwrites(&params.overwrites));

        if let Some(topic) = &params.topic {
            builder = builder.topic(topic.as_str());
        }
        if let Some(category_id) = params.category_id {
            builder = builder.category(ChannelId::new(category_id));
        }

        self.create_channel(guild_id, builder).await
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        params: &CreateVoiceChannelParams,
    ) -> Result<u64, RemoteError> {
        let mut builder = CreateChannel::new(params.name.as_str())
            .kind(ChannelType::Voice)
            .permissions(to_serenity_overwrites(&params.overwrites));

        if let Some(user_limit) = params.user_limit {
            builder = builder.user_limit(user_limit);
        }
        if let Some(bitrate) = params.bitrate {
            builder = builder.bitrate(bitrate);
        }
        if let Some(category_id) = params.category_id {
            builder = builder.category(ChannelId::new(category_id));
        }

        self.create_channel(guild_id, builder).await
    }
}

impl DiscordGuildApi {
    async fn create_channel(
        &self,
        guild_id: u64,
        builder: CreateChannel<'_>,
    ) -> Result<u64, RemoteError> {
        let channel = GuildId::new(guild_id)
            .create_channel(&self.http, builder)
            .await
            .map_err(classify_error)?;

        Ok(channel.id.get())
    }
}

/// Builds a snapshot from serenity's role and channel models.
///
/// Categories are split out of the channel list; every other channel kind is kept with
/// its kind-specific attributes. Announcement channels are treated as text channels.
pub fn snapshot_from_parts<'a>(
    guild_id: u64,
    name: &str,
    roles: impl IntoIterator<Item = &'a Role>,
    channels: impl IntoIterator<Item = &'a GuildChannel>,
) -> GuildSnapshot {
    let roles = roles
        .into_iter()
        .map(|role| role_snapshot(guild_id, role))
        .collect();

    let mut categories = Vec::new();
    let mut plain_channels = Vec::new();

    for channel in channels {
        if channel.kind == ChannelType::Category {
            categories.push(CategorySnapshot {
                channel_id: channel.id.get(),
                name: channel.name.clone(),
                position: channel.position,
                overwrites: from_serenity_overwrites(&channel.permission_overwrites),
            });
        } else {
            plain_channels.push(channel_snapshot(channel));
        }
    }

    GuildSnapshot {
        guild_id,
        name: name.to_string(),
        roles,
        categories,
        channels: plain_channels,
    }
}

fn role_snapshot(guild_id: u64, role: &Role) -> RoleSnapshot {
    RoleSnapshot {
        role_id: role.id.get(),
        name: role.name.clone(),
        permissions: role.permissions.bits(),
        color: role.colour.0,
        hoist: role.hoist,
        mentionable: role.mentionable,
        position: role.position,
        // The @everyone role shares its ID with the guild
        is_default: role.id.get() == guild_id,
        is_managed: role.managed,
    }
}

fn channel_snapshot(channel: &GuildChannel) -> ChannelSnapshot {
    let kind = match channel.kind {
        // Announcement channels carry the same settings and are recreated as text
        ChannelType::Text | ChannelType::News => ChannelKind::Text {
            topic: channel.topic.clone(),
            slow_mode: channel.rate_limit_per_user.unwrap_or(0),
            nsfw: channel.nsfw,
        },
        ChannelType::Voice => ChannelKind::Voice {
            user_limit: channel.user_limit,
            bitrate: channel.bitrate,
        },
        _ => ChannelKind::Other,
    };

    ChannelSnapshot {
        channel_id: channel.id.get(),
        name: channel.name.clone(),
        kind,
        parent_id: channel.parent_id.map(|id| id.get()),
        position: channel.position,
        overwrites: from_serenity_overwrites(&channel.permission_overwrites),
    }
}

fn from_serenity_overwrites(overwrites: &[SerenityOverwrite]) -> Vec<PermissionOverwrite> {
    overwrites
        .iter()
        .filter_map(|overwrite| {
            let subject = match overwrite.kind {
                PermissionOverwriteType::Role(id) => OverwriteSubject::Role(id.get()),
                PermissionOverwriteType::Member(id) => OverwriteSubject::Member(id.get()),
                _ => return None,
            };

            Some(PermissionOverwrite {
                subject,
                allow: overwrite.allow.bits(),
                deny: overwrite.deny.bits(),
            })
        })
        .collect()
}

fn to_serenity_overwrites(overwrites: &[PermissionOverwrite]) -> Vec<SerenityOverwrite> {
    overwrites
        .iter()
        .map(|overwrite| SerenityOverwrite {
            allow: Permissions::from_bits_truncate(overwrite.allow),
            deny: Permissions::from_bits_truncate(overwrite.deny),
            kind: match overwrite.subject {
                OverwriteSubject::Role(id) => PermissionOverwriteType::Role(RoleId::new(id)),
                OverwriteSubject::Member(id) => PermissionOverwriteType::Member(UserId::new(id)),
            },
        })
        .collect()
}

/// Maps a serenity error onto the typed remote failure kinds.
pub fn classify_error(err: serenity::Error) -> RemoteError {
    match &err {
        // No status means the request never got an answer
        serenity::Error::Http(http_err) => match http_err.status_code() {
            Some(status) => classify_status(status.as_u16(), err.to_string()),
            None => RemoteError::Transient(err.to_string()),
        },
        _ => RemoteError::Permanent(err.to_string()),
    }
}

/// Maps an HTTP status code onto a [`RemoteError`].
///
/// serenity's own ratelimiter waits out 429s before they reach this point, so a 429 here
/// is rare and the response's `Retry-After` is not available. `RateLimited` always
/// carries [`DEFAULT_RETRY_AFTER`], not the value Discord sent.
pub fn classify_status(status: u16, message: String) -> RemoteError {
    match status {
        401 | 403 => RemoteError::Authorization(message),
        404 => RemoteError::NotFound(message),
        429 => RemoteError::RateLimited {
            retry_after: DEFAULT_RETRY_AFTER,
        },
        500..=599 => RemoteError::Transient(message),
        _ => RemoteError::Permanent(message),
    }
}
