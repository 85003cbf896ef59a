use std::time::Instant;

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};

use crate::host::{Command, CommandSchema};

pub struct Ping {
    definition: CommandSchema,
}

impl Ping {
    pub fn new() -> Self {
        Self {
            definition: register(),
        }
    }
}

pub async fn run(context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
    let started = Instant::now();
    let response = CreateInteractionResponseMessage::new().content("Pong!");
    interaction
        .create_response(&context.http, CreateInteractionResponse::Message(response))
        .await?;
    let latency = started.elapsed().as_millis();

    interaction
        .edit_response(
            &context.http,
            EditInteractionResponse::new().content(format!("Pong!\nLatency: {latency}ms")),
        )
        .await?;

    Ok(())
}

pub fn register() -> CommandSchema {
    CommandSchema::new("ping", "Replies with Pong!")
}

#[serenity::async_trait]
impl Command for Ping {
    fn definition(&self) -> &CommandSchema {
        &self.definition
    }

    async fn execute(&self, context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
        run(context, interaction).await
    }
}
