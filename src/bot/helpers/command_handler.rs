use anyhow::Result;
use serenity::all::{CommandInteraction, Context};

use crate::bot::BotState;
use crate::commands;
use crate::utils::report;

const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred while executing this command!";

/// Route a slash command to the handler registered under its name
pub async fn handle_slash_command(
    state: &BotState,
    context: &Context,
    command: &CommandInteraction,
) -> Result<()> {
    let name = command.data.name.as_str();

    let Some(handler) = state.commands.get(name) else {
        tracing::warn!("[CMD] Unknown slash command received: '{}'", name);
        return commands::error::run(context, command, "Command not found!").await;
    };

    if let Err(e) = handler.execute(context, command).await {
        tracing::error!("[CMD] Command {} failed: {:#}", name, e);
        let message = report::user_friendly_message(&e, DEFAULT_FAILURE_MESSAGE);

        // The command may already have answered, in which case only a follow-up is accepted.
        if commands::error::run(context, command, message).await.is_err()
            && let Err(send_err) = commands::error::follow_up(context, command, message).await
        {
            tracing::warn!("[CMD] Failed to send error response to user: {}", send_err);
        }
    }

    Ok(())
}
