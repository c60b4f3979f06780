//! Parameters of the mutating remote calls.
//!
//! Each struct carries exactly what the corresponding
//! [`GuildApi`](crate::api::GuildApi) operation sends. All role and category references
//! are already translated into the target guild's namespace.

use crate::model::guild::PermissionOverwrite;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRoleParams {
    pub name: String,
    pub permissions: u64,
    pub color: u32,
    pub hoist: bool,
    pub mentionable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryParams {
    pub name: String,
    pub overwrites: Vec<PermissionOverwrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTextChannelParams {
    pub name: String,
    pub topic: Option<String>,
    pub slow_mode: u16,
    pub nsfw: bool,
    /// Target-guild category to nest the channel under.
    pub category_id: Option<u64>,
    pub overwrites: Vec<PermissionOverwrite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateVoiceChannelParams {
    pub name: String,
    pub user_limit: Option<u32>,
    pub bitrate: Option<u32>,
    /// Target-guild category to nest the channel under.
    pub category_id: Option<u64>,
    pub overwrites: Vec<PermissionOverwrite>,
}
