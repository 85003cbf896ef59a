use serenity::all::{CommandType, Interaction};

use crate::bot::helpers::command_handler;
use crate::bot::{BotState, GatewayEvent};
use crate::host::Event;

/// Routes chat-input commands to the command registry.
pub struct InteractionCreateEvent;

#[serenity::async_trait]
impl Event<GatewayEvent> for InteractionCreateEvent {
    fn name(&self) -> &str {
        GatewayEvent::INTERACTION_CREATE
    }

    async fn execute(&self, args: &GatewayEvent) -> anyhow::Result<()> {
        let GatewayEvent::InteractionCreate {
            context,
            interaction: Interaction::Command(command),
        } = args
        else {
            return Ok(());
        };

        if command.data.kind != CommandType::ChatInput {
            return Ok(());
        }

        let state = BotState::from_context(context).await?;
        command_handler::handle_slash_command(&state, context, command).await
    }
}
