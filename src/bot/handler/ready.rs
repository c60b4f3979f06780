//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake. The handler
//! registers the `/clone` command in the source guild only, so it is never offered
//! anywhere else and guild-scoped registration makes it available immediately.

use dioxus_logger::tracing;
use serenity::all::{Context, GuildId, Ready};

use crate::{bot::handler::interaction::clone_command, service::replication::gate::ConfirmationGate};

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `gate` - Confirmation gate holding the configured source guild
/// - `ctx` - Discord context for registering commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(gate: &ConfirmationGate, ctx: Context, ready: Ready) {
    tracing::info!("Logged in as {} (ID: {})", ready.user.name, ready.user.id);

    let guild_id = GuildId::new(gate.source_guild_id());

    match guild_id.set_commands(&ctx.http, vec![clone_command()]).await {
        Ok(commands) => tracing::info!(
            "Registered {} command(s) in source guild {}, bot is ready to receive commands",
            commands.len(),
            guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to register commands in source guild {}: {:?}",
            guild_id,
            e
        ),
    }
}
