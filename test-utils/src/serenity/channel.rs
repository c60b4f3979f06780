//! Test factory for creating Serenity GuildChannel objects.
//!
//! Channels carry enough optional, kind-specific fields that a positional factory
//! function gets unwieldy, so this module offers a small fluent builder instead. The
//! builder assembles the JSON Discord would send and deserializes it into a
//! `GuildChannel`.

use serenity::all::GuildChannel;

const TEXT: u8 = 0;
const VOICE: u8 = 2;
const CATEGORY: u8 = 4;
const ANNOUNCEMENT: u8 = 5;
const STAGE: u8 = 13;

const OVERWRITE_ROLE: u8 = 0;
const OVERWRITE_MEMBER: u8 = 1;

/// Fluent builder for test `GuildChannel` values.
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::channel::ChannelBuilder;
///
/// let lounge = ChannelBuilder::voice(400, 1, "lounge")
///     .user_limit(10)
///     .bitrate(64000)
///     .position(2)
///     .build();
/// ```
pub struct ChannelBuilder {
    channel_id: u64,
    guild_id: u64,
    name: String,
    kind: u8,
    parent_id: Option<u64>,
    position: u16,
    topic: Option<String>,
    nsfw: bool,
    rate_limit_per_user: Option<u16>,
    user_limit: Option<u32>,
    bitrate: Option<u32>,
    overwrites: Vec<serde_json::Value>,
}

impl ChannelBuilder {
    fn new(channel_id: u64, guild_id: u64, name: &str, kind: u8) -> Self {
        Self {
            channel_id,
            guild_id,
            name: name.to_string(),
            kind,
            parent_id: None,
            position: 0,
            topic: None,
            nsfw: false,
            rate_limit_per_user: None,
            user_limit: None,
            bitrate: None,
            overwrites: Vec::new(),
        }
    }

    pub fn text(channel_id: u64, guild_id: u64, name: &str) -> Self {
        Self::new(channel_id, guild_id, name, TEXT)
    }

    pub fn voice(channel_id: u64, guild_id: u64, name: &str) -> Self {
        Self::new(channel_id, guild_id, name, VOICE)
    }

    pub fn category(channel_id: u64, guild_id: u64, name: &str) -> Self {
        Self::new(channel_id, guild_id, name, CATEGORY)
    }

    pub fn announcement(channel_id: u64, guild_id: u64, name: &str) -> Self {
        Self::new(channel_id, guild_id, name, ANNOUNCEMENT)
    }

    pub fn stage(channel_id: u64, guild_id: u64, name: &str) -> Self {
        Self::new(channel_id, guild_id, name, STAGE)
    }

    pub fn parent(mut self, category_id: u64) -> Self {
        self.parent_id = Some(category_id);
        self
    }

    pub fn position(mut self, position: u16) -> Self {
        self.position = position;
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn nsfw(mut self, nsfw: bool) -> Self {
        self.nsfw = nsfw;
        self
    }

    pub fn slow_mode(mut self, seconds: u16) -> Self {
        self.rate_limit_per_user = Some(seconds);
        self
    }

    pub fn user_limit(mut self, user_limit: u32) -> Self {
        self.user_limit = Some(user_limit);
        self
    }

    pub fn bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    pub fn role_overwrite(self, role_id: u64, allow: u64, deny: u64) -> Self {
        self.overwrite(role_id, OVERWRITE_ROLE, allow, deny)
    }

    pub fn member_overwrite(self, user_id: u64, allow: u64, deny: u64) -> Self {
        self.overwrite(user_id, OVERWRITE_MEMBER, allow, deny)
    }

    fn overwrite(mut self, id: u64, kind: u8, allow: u64, deny: u64) -> Self {
        self.overwrites.push(serde_json::json!({
            "id": id.to_string(),
            "type": kind,
            "allow": allow.to_string(),
            "deny": deny.to_string(),
        }));
        self
    }

    /// Builds the channel.
    ///
    /// # Panics
    /// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
    pub fn build(self) -> GuildChannel {
        serde_json::from_value(serde_json::json!({
            "id": self.channel_id.to_string(),
            "guild_id": self.guild_id.to_string(),
            "type": self.kind,
            "name": self.name,
            "position": self.position,
            "parent_id": self.parent_id.map(|id| id.to_string()),
            "topic": self.topic,
            "nsfw": self.nsfw,
            "rate_limit_per_user": self.rate_limit_per_user,
            "user_limit": self.user_limit,
            "bitrate": self.bitrate,
            "permission_overwrites": self.overwrites,
            "flags": 0,
        }))
        .expect("Failed to create test channel - invalid JSON structure")
    }
}
