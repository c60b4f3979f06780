//! Business logic of the bot.
//!
//! - `rate_limit` - Pluggable throttling applied after every mutating remote call
//! - `replication` - The replication run and the confirmation gate in front of it

pub mod rate_limit;
pub mod replication;
