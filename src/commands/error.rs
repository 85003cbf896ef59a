use serenity::all::{
    Colour, CommandInteraction, Context, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage,
};

fn error_embed(error_message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("Error")
        .description(error_message)
        .color(Colour::RED)
}

/// Answers the interaction with an ephemeral error embed.
pub async fn run(
    context: &Context,
    interaction: &CommandInteraction,
    error_message: &str,
) -> anyhow::Result<()> {
    let message = CreateInteractionResponseMessage::new()
        .embed(error_embed(error_message))
        .ephemeral(true);

    interaction
        .create_response(&context.http, CreateInteractionResponse::Message(message))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send error response: {}", e))?;

    Ok(())
}

/// For interactions that already received their initial response.
pub async fn follow_up(
    context: &Context,
    interaction: &CommandInteraction,
    error_message: &str,
) -> anyhow::Result<()> {
    let followup = CreateInteractionResponseFollowup::new()
        .embed(error_embed(error_message))
        .ephemeral(true);

    interaction
        .create_followup(&context.http, followup)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send error follow-up: {}", e))?;

    Ok(())
}
