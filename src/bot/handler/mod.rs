use serenity::all::{Context, EventHandler, Interaction, Ready};
use serenity::async_trait;

use crate::service::replication::gate::ConfirmationGate;

pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub gate: ConfirmationGate,
}

impl Handler {
    pub fn new(gate: ConfirmationGate) -> Self {
        Self { gate }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.gate, ctx, ready).await;
    }

    /// Called when a user invokes an application command
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.gate, ctx, interaction).await;
    }
}
