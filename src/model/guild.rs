//! Guild snapshot models.
//!
//! A snapshot is an immutable copy of a guild's roles, categories, and channels taken at
//! the start of a run. Identifiers are plain `u64` snowflakes and only meaningful within
//! the guild they were read from.

/// Immutable view of one guild for the duration of a run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuildSnapshot {
    /// Discord guild ID as a u64.
    pub guild_id: u64,
    /// Guild display name.
    pub name: String,
    /// All roles including the default role, in no particular order.
    pub roles: Vec<RoleSnapshot>,
    /// Channel categories, in no particular order.
    pub categories: Vec<CategorySnapshot>,
    /// Non-category channels, in no particular order.
    pub channels: Vec<ChannelSnapshot>,
}

impl GuildSnapshot {
    /// ID of the implicit "everyone" role, which always shares the guild's ID.
    pub fn default_role_id(&self) -> u64 {
        self.guild_id
    }

    pub fn default_role(&self) -> Option<&RoleSnapshot> {
        self.roles.iter().find(|role| role.is_default)
    }

    /// Roles sorted by ascending position, ties broken by ID.
    pub fn roles_by_position(&self) -> Vec<&RoleSnapshot> {
        let mut roles: Vec<&RoleSnapshot> = self.roles.iter().collect();
        roles.sort_by_key(|role| (role.position, role.role_id));
        roles
    }

    /// Groups channels under their categories.
    ///
    /// The uncategorized group comes first, then categories in ascending position.
    /// Channels within a group are sorted by position. A channel whose parent is not a
    /// known category lands in the uncategorized group.
    pub fn by_category(&self) -> Vec<(Option<&CategorySnapshot>, Vec<&ChannelSnapshot>)> {
        let mut categories: Vec<&CategorySnapshot> = self.categories.iter().collect();
        categories.sort_by_key(|category| (category.position, category.channel_id));

        let is_known = |id: u64| categories.iter().any(|c| c.channel_id == id);

        let mut uncategorized: Vec<&ChannelSnapshot> = self
            .channels
            .iter()
            .filter(|channel| !channel.parent_id.is_some_and(|id| is_known(id)))
            .collect();
        sort_channels(&mut uncategorized);

        let mut groups = vec![(None, uncategorized)];

        for category in &categories {
            let mut members: Vec<&ChannelSnapshot> = self
                .channels
                .iter()
                .filter(|channel| channel.parent_id == Some(category.channel_id))
                .collect();
            sort_channels(&mut members);
            groups.push((Some(*category), members));
        }

        groups
    }

    /// IDs of every category and channel, non-category channels first.
    pub fn all_channel_ids(&self) -> Vec<(u64, &str)> {
        self.channels
            .iter()
            .map(|channel| (channel.channel_id, channel.name.as_str()))
            .chain(
                self.categories
                    .iter()
                    .map(|category| (category.channel_id, category.name.as_str())),
            )
            .collect()
    }
}

fn sort_channels(channels: &mut [&ChannelSnapshot]) {
    channels.sort_by_key(|channel| (channel.position, channel.channel_id));
}

/// Discord role with everything needed to recreate it elsewhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleSnapshot {
    /// Discord role ID as a u64.
    pub role_id: u64,
    /// Role display name.
    pub name: String,
    /// Permission bitset.
    pub permissions: u64,
    /// Role colour as a 24-bit RGB integer.
    pub color: u32,
    /// Whether members are displayed separately in the member list.
    pub hoist: bool,
    /// Whether anyone can mention the role.
    pub mentionable: bool,
    /// Role position in the hierarchy (higher = more important).
    pub position: u16,
    /// The implicit "everyone" role of the guild.
    pub is_default: bool,
    /// Owned by an integration such as another bot; cannot be created by us.
    pub is_managed: bool,
}

/// Subject of a permission overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverwriteSubject {
    Role(u64),
    Member(u64),
}

/// Per-role or per-member exception to a channel's inherited permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionOverwrite {
    pub subject: OverwriteSubject,
    pub allow: u64,
    pub deny: u64,
}

/// Channel category and the overwrites its channels inherit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategorySnapshot {
    /// Discord channel ID of the category.
    pub channel_id: u64,
    pub name: String,
    pub position: u16,
    pub overwrites: Vec<PermissionOverwrite>,
}

/// Kind-specific attributes of a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelKind {
    Text {
        topic: Option<String>,
        /// Slow-mode delay in seconds.
        slow_mode: u16,
        nsfw: bool,
    },
    Voice {
        user_limit: Option<u32>,
        bitrate: Option<u32>,
    },
    /// Stage, forum and any other kind; never replicated.
    Other,
}

/// Non-category channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    /// Discord channel ID as a u64.
    pub channel_id: u64,
    pub name: String,
    pub kind: ChannelKind,
    /// Category the channel is nested under, if any.
    pub parent_id: Option<u64>,
    pub position: u16,
    pub overwrites: Vec<PermissionOverwrite>,
}
