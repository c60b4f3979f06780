//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (Role, GuildChannel) for testing purposes. These factories create valid
//! Serenity objects by deserializing JSON, simulating what Discord's API
//! would return.
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create plain Serenity Role objects
//! - `role::create_test_role_with` - Create roles with permissions and managed flag
//! - `channel::ChannelBuilder` - Create Serenity GuildChannel objects of any kind

pub mod channel;
pub mod role;

// Re-export commonly used functions for convenience
pub use channel::ChannelBuilder;
pub use role::{create_test_role, create_test_role_with};
