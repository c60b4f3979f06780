//! Remote guild-management API consumed by the replication services.
//!
//! The services talk to Discord only through the [`GuildApi`] trait. Production code uses
//! [`DiscordGuildApi`], which wraps serenity's HTTP client; tests use an in-memory fake
//! that records every call.

pub mod discord;
#[cfg(test)]
pub mod mock;
#[cfg(test)]
mod test;

pub use discord::DiscordGuildApi;

use serenity::async_trait;

use crate::{
    error::remote::RemoteError,
    model::{
        guild::GuildSnapshot,
        params::{
            CreateCategoryParams, CreateRoleParams, CreateTextChannelParams,
            CreateVoiceChannelParams,
        },
    },
};

/// Operations the replication run needs from the remote service.
///
/// Every mutating method issues exactly one remote call. Created objects are returned as
/// their new target-guild IDs. Implementations never retry; callers decide what to do
/// with the typed [`RemoteError`].
#[async_trait]
pub trait GuildApi: Send + Sync {
    /// Resolves a guild and reads its roles, categories, and channels.
    async fn fetch_guild(&self, guild_id: u64) -> Result<GuildSnapshot, RemoteError>;

    /// Overwrites the permission bitset of the guild's default role.
    async fn edit_default_role_permissions(
        &self,
        guild_id: u64,
        permissions: u64,
    ) -> Result<(), RemoteError>;

    async fn create_role(
        &self,
        guild_id: u64,
        params: &CreateRoleParams,
    ) -> Result<u64, RemoteError>;

    /// Deletes a channel or category.
    async fn delete_channel(&self, channel_id: u64) -> Result<(), RemoteError>;

    async fn create_category(
        &self,
        guild_id: u64,
        params: &CreateCategoryParams,
    ) -> Result<u64, RemoteError>;

    async fn create_text_channel(
        &self,
        guild_id: u64,
        params: &CreateTextChannelParams,
    ) -> Result<u64, RemoteError>;

    async fn create_voice_channel(
        &self,
        guild_id: u64,
        params: &CreateVoiceChannelParams,
    ) -> Result<u64, RemoteError>;
}
