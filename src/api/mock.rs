//! In-memory [`GuildApi`] for tests.
//!
//! Holds a mutable copy of each registered guild, applies every successful mutation to
//! it, and records every call in order so tests can assert on both the resulting guild
//! state and the exact call sequence. Failures are injected per item name (creates),
//! per channel ID (deletes), or for the default-role edit.

use serenity::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::{
    api::GuildApi,
    error::remote::RemoteError,
    model::{
        guild::{CategorySnapshot, ChannelKind, ChannelSnapshot, GuildSnapshot, RoleSnapshot},
        params::{
            CreateCategoryParams, CreateRoleParams, CreateTextChannelParams,
            CreateVoiceChannelParams,
        },
    },
};

/// First ID handed out to objects created through the mock.
const FIRST_CREATED_ID: u64 = 900_000;

/// One recorded call against the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchGuild(u64),
    EditDefaultRolePermissions { guild_id: u64, permissions: u64 },
    CreateRole { guild_id: u64, params: CreateRoleParams },
    DeleteChannel(u64),
    CreateCategory { guild_id: u64, params: CreateCategoryParams },
    CreateTextChannel { guild_id: u64, params: CreateTextChannelParams },
    CreateVoiceChannel { guild_id: u64, params: CreateVoiceChannelParams },
}

impl ApiCall {
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::FetchGuild(_))
    }

    pub fn is_creation(&self) -> bool {
        matches!(
            self,
            Self::CreateCategory { .. } | Self::CreateTextChannel { .. } | Self::CreateVoiceChannel { .. }
        )
    }
}

#[derive(Default)]
pub struct MockGuildApi {
    guilds: Mutex<HashMap<u64, GuildSnapshot>>,
    calls: Mutex<Vec<ApiCall>>,
    create_failures: HashMap<String, RemoteError>,
    delete_failures: HashMap<u64, RemoteError>,
    default_role_failure: Option<RemoteError>,
    next_id: AtomicU64,
}

impl MockGuildApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(FIRST_CREATED_ID),
            ..Default::default()
        }
    }

    pub fn with_guild(self, guild: GuildSnapshot) -> Self {
        self.guilds
            .lock()
            .unwrap()
            .insert(guild.guild_id, guild);
        self
    }

    /// Makes every create call for an item with this name fail.
    pub fn fail_create(mut self, name: &str, error: RemoteError) -> Self {
        self.create_failures.insert(name.to_string(), error);
        self
    }

    pub fn fail_delete(mut self, channel_id: u64, error: RemoteError) -> Self {
        self.delete_failures.insert(channel_id, error);
        self
    }

    pub fn fail_default_role_edit(mut self, error: RemoteError) -> Self {
        self.default_role_failure = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutating_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutating()).count()
    }

    /// Current state of a guild, including everything created or deleted so far.
    pub fn guild(&self, guild_id: u64) -> GuildSnapshot {
        self.guilds
            .lock()
            .unwrap()
            .get(&guild_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_create(&self, name: &str) -> Result<u64, RemoteError> {
        match self.create_failures.get(name) {
            Some(error) => Err(error.clone()),
            None => Ok(self.next_id.fetch_add(1, Ordering::SeqCst)),
        }
    }

    fn update_guild<F>(&self, guild_id: u64, update: F) -> Result<(), RemoteError>
    where
        F: FnOnce(&mut GuildSnapshot),
    {
        let mut guilds = self.guilds.lock().unwrap();
        let guild = guilds
            .get_mut(&guild_id)
            .ok_or_else(|| RemoteError::NotFound(format!("Unknown Guild {}", guild_id)))?;
        update(guild);
        Ok(())
    }
}

#[async_trait]
impl GuildApi for MockGuildApi {
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSnapshot, RemoteError> {
        self.record(ApiCall::FetchGuild(guild_id));

        self.guilds
            .lock()
            .unwrap()
            .get(&guild_id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("Unknown Guild {}", guild_id)))
    }

    async fn edit_default_role_permissions(
        &self,
        guild_id: u64,
        permissions: u64,
    ) -> Result<(), RemoteError> {
        self.record(ApiCall::EditDefaultRolePermissions {
            guild_id,
            permissions,
        });

        if let Some(error) = &self.default_role_failure {
            return Err(error.clone());
        }

        self.update_guild(guild_id, |guild| {
            if let Some(role) = guild.roles.iter_mut().find(|r| r.is_default) {
                role.permissions = permissions;
            }
        })
    }

    async fn create_role(
        &self,
        guild_id: u64,
        params: &CreateRoleParams,
    ) -> Result<u64, RemoteError> {
        self.record(ApiCall::CreateRole {
            guild_id,
            params: params.clone(),
        });

        let role_id = self.check_create(&params.name)?;
        self.update_guild(guild_id, |guild| {
            let position = guild.roles.len() as u16;
            guild.roles.push(RoleSnapshot {
                role_id,
                name: params.name.clone(),
                permissions: params.permissions,
                color: params.color,
                hoist: params.hoist,
                mentionable: params.mentionable,
                position,
                is_default: false,
                is_managed: false,
            });
        })?;

        Ok(role_id)
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), RemoteError> {
        self.record(ApiCall::DeleteChannel(channel_id));

        if let Some(error) = self.delete_failures.get(&channel_id) {
            return Err(error.clone());
        }

        let mut guilds = self.guilds.lock().unwrap();
        for guild in guilds.values_mut() {
            guild.channels.retain(|c| c.channel_id != channel_id);
            guild.categories.retain(|c| c.channel_id != channel_id);
        }

        Ok(())
    }

    async fn create_category(
        &self,
        guild_id: u64,
        params: &CreateCategoryParams,
    ) -> Result<u64, RemoteError> {
        self.record(ApiCall::CreateCategory {
            guild_id,
            params: params.clone(),
        });

        let channel_id = self.check_create(&params.name)?;
        self.update_guild(guild_id, |guild| {
            let position = guild.categories.len() as u16;
            guild.categories.push(CategorySnapshot {
                channel_id,
                name: params.name.clone(),
                position,
                overwrites: params.overwrites.clone(),
            });
        })?;

        Ok(channel_id)
    }

    async fn create_text_channel(
        &self,
        guild_id: u64,
        params: &CreateTextChannelParams,
    ) -> Result<u64, RemoteError> {
        self.record(ApiCall::CreateTextChannel {
            guild_id,
            params: params.clone(),
        });

        let channel_id = self.check_create(&params.name)?;
        self.update_guild(guild_id, |guild| {
            let position = guild.channels.len() as u16;
            guild.channels.push(ChannelSnapshot {
                channel_id,
                name: params.name.clone(),
                kind: ChannelKind::Text {
                    topic: params.topic.clone(),
                    slow_mode: params.slow_mode,
                    nsfw: params.nsfw,
                },
                parent_id: params.category_id,
                position,
                overwrites: params.overwrites.clone(),
            });
        })?;

        Ok(channel_id)
    }

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        params: &CreateVoiceChannelParams,
    ) -> Result<u64, RemoteError> {
        self.record(ApiCall::CreateVoiceChannel {
            guild_id,
            params: params.clone(),
        });

        let channel_id = self.check_create(&params.name)?;
        self.update_guild(guild_id, |guild| {
            let position = guild.channels.len() as u16;
            guild.channels.push(ChannelSnapshot {
                channel_id,
                name: params.name.clone(),
                kind: ChannelKind::Voice {
                    user_limit: params.user_limit,
                    bitrate: params.bitrate,
                },
                parent_id: params.category_id,
                position,
                overwrites: params.overwrites.clone(),
            });
        })?;

        Ok(channel_id)
    }
}
