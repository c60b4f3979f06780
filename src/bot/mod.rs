//! Discord bot integration exposing the `/clone` command.
//!
//! The bot connects to the gateway, registers the `/clone` command in the source guild
//! once it is ready, and hands every invocation to the
//! [`ConfirmationGate`](crate::service::replication::gate::ConfirmationGate). Accepted
//! runs execute in their own tokio task so the interaction can be acknowledged within
//! Discord's response deadline.
//!
//! # Gateway Intents
//!
//! The bot only requires the `GUILDS` intent: roles and channels are read through the
//! HTTP API at the start of each run rather than from the gateway cache.

pub mod handler;
pub mod start;
