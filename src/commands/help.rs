use serenity::all::{
    Colour, CommandInteraction, Context, CreateEmbed, CreateEmbedFooter, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};

use crate::bot::BotState;
use crate::host::{Command, CommandRegistry, CommandSchema};

pub struct Help {
    definition: CommandSchema,
}

impl Help {
    pub fn new() -> Self {
        Self {
            definition: register(),
        }
    }
}

pub async fn run(context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
    let state = BotState::from_context(context).await?;
    let embed = create_help_embed(&state.commands);

    let response = CreateInteractionResponseMessage::new()
        .embed(embed)
        .ephemeral(true);

    interaction
        .create_response(&context.http, CreateInteractionResponse::Message(response))
        .await?;

    Ok(())
}

/// One field per category, listing each command with its description.
pub fn create_help_embed(commands: &CommandRegistry) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("Commands")
        .description(format!("{} command(s) available:", commands.size()))
        .color(Colour::BLURPLE);

    for (category, names) in commands.grouped() {
        let lines: Vec<String> = names
            .iter()
            .filter_map(|name| commands.get(name))
            .map(|command| {
                let definition = command.definition();
                format!("`/{}` - {}", definition.name, definition.description)
            })
            .collect();

        embed = embed.field(category_title(category.as_deref()), lines.join("\n"), false);
    }

    embed.footer(CreateEmbedFooter::new("Commands are grouped by module category"))
}

/// `utils` becomes `Utils`; uncategorized commands go under `General`.
pub fn category_title(category: Option<&str>) -> String {
    match category {
        Some(category) => {
            let mut chars = category.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "General".to_string(),
            }
        }
        None => "General".to_string(),
    }
}

pub fn register() -> CommandSchema {
    CommandSchema::new("help", "Lists every available command by category")
}

#[serenity::async_trait]
impl Command for Help {
    fn definition(&self) -> &CommandSchema {
        &self.definition
    }

    async fn execute(&self, context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
        run(context, interaction).await
    }
}
