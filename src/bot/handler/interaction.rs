//! `/clone` command handler.
//!
//! Validates the invocation through the confirmation gate, answers with an ephemeral
//! message, and for accepted invocations runs the replication in a separate tokio task.
//! Progress is only reported through the logs; the invoker gets one more ephemeral
//! message if the run cannot resolve the source or target guild.

use dioxus_logger::tracing;
use serenity::all::{
    CommandDataOption, CommandDataOptionValue, CommandInteraction, CommandOptionType, Context,
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
};
use std::sync::Arc;

use crate::{
    api::{DiscordGuildApi, GuildApi},
    error::replication::ReplicationError,
    service::replication::gate::ConfirmationGate,
};

pub const CLONE_COMMAND: &str = "clone";
const CONFIRMATION_OPTION: &str = "confirmation";

const ACKNOWLEDGEMENT: &str =
    "Clone process initiated. This will take a while. Check your bot's console for progress.";
const GUILDS_UNAVAILABLE: &str = "Error: Bot could not find both the source and target servers. \
     Check your configuration and make sure the bot is in both servers.";

/// Definition of the `/clone` command registered in the source guild.
pub fn clone_command() -> CreateCommand {
    CreateCommand::new(CLONE_COMMAND)
        .description("Clones the roles and channels from the source server to the target server.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                CONFIRMATION_OPTION,
                "Type 'CONFIRM' to start the cloning process. This is for safety.",
            )
            .required(true),
        )
}

/// Handles the interaction_create event.
///
/// Ignores everything except `/clone` command invocations.
///
/// # Arguments
/// - `gate` - Confirmation gate deciding whether a run may start
/// - `ctx` - Discord context providing the HTTP client
/// - `interaction` - The received interaction
pub async fn handle_interaction_create(
    gate: &ConfirmationGate,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    if command.data.name != CLONE_COMMAND {
        return;
    }

    let confirmation = confirmation_value(&command.data.options);
    let origin_guild_id = command.guild_id.map(|id| id.get());
    let api: Arc<dyn GuildApi> = Arc::new(DiscordGuildApi::new(ctx.http.clone()));

    let run = match gate.accept(api, origin_guild_id, confirmation).await {
        Ok(run) => run,
        Err(rejection) => {
            respond_ephemeral(&ctx, &command, rejection.user_message()).await;
            return;
        }
    };

    respond_ephemeral(&ctx, &command, ACKNOWLEDGEMENT).await;

    tokio::spawn(async move {
        match run.execute().await {
            Ok(summary) => {
                tracing::info!("Clone requested by {} finished: {}", command.user.name, summary)
            }
            Err(ReplicationError::GuildUnavailable { guild_id, source }) => {
                tracing::error!(
                    "Clone requested by {} aborted, guild {} unavailable: {}",
                    command.user.name,
                    guild_id,
                    source
                );

                let followup = CreateInteractionResponseFollowup::new()
                    .content(GUILDS_UNAVAILABLE)
                    .ephemeral(true);
                if let Err(e) = command.create_followup(&ctx.http, followup).await {
                    tracing::error!("Failed to send follow-up message: {:?}", e);
                }
            }
        }
    });
}

/// Extracts the confirmation option, empty when absent.
fn confirmation_value(options: &[CommandDataOption]) -> &str {
    options
        .iter()
        .find(|option| option.name == CONFIRMATION_OPTION)
        .and_then(|option| match &option.value {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        })
        .unwrap_or_default()
}

async fn respond_ephemeral(ctx: &Context, command: &CommandInteraction, content: &str) {
    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to respond to /{} command: {:?}", CLONE_COMMAND, e);
    }
}
