//! Guildclone Test Utils
//!
//! Provides shared testing utilities for the guildclone bot. The replication services
//! work on snapshots converted from serenity models; the factories here build those
//! serenity models the same way Discord's API delivers them, by deserializing JSON.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{channel::ChannelBuilder, role::create_test_role};
//!
//! let moderator = create_test_role(222222222, "Mod", 0x00FF00, 1);
//! let chat = ChannelBuilder::text(300000000, 111111111, "chat")
//!     .parent(200000000)
//!     .role_overwrite(222222222, 1024, 0)
//!     .build();
//! ```

pub mod serenity;
