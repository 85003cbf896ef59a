use std::sync::Arc;

use serenity::all::{
    CommandInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    Permissions, ResolvedOption, ResolvedValue,
};

use crate::host::{Command, CommandSchema, ModuleManifest, OptionKind, OptionSchema};

const DEFAULT_REASON: &str = "No reason given";
const MAX_DELETE_DAYS: u8 = 7;

pub struct Ban {
    definition: CommandSchema,
    default_reason: String,
}

/// Module factory; `settings.default_reason` overrides the fallback reason.
pub fn build(manifest: &ModuleManifest) -> anyhow::Result<Arc<dyn Command>> {
    Ok(Arc::new(Ban {
        definition: register(),
        default_reason: manifest
            .setting_str("default_reason")
            .unwrap_or(DEFAULT_REASON)
            .to_string(),
    }))
}

pub fn register() -> CommandSchema {
    CommandSchema::new("ban", "Bans a user from the server")
        .add_option(
            OptionSchema::new(OptionKind::User, "user", "The user to ban").required(true),
        )
        .add_option(OptionSchema::new(
            OptionKind::String,
            "reason",
            "Why the user is being banned",
        ))
        .add_option(
            OptionSchema::new(
                OptionKind::Integer,
                "delete_messages",
                "Days of the user's messages to delete",
            )
            .min_int_value(0)
            .max_int_value(MAX_DELETE_DAYS.into()),
        )
        .default_member_permissions(Permissions::BAN_MEMBERS.bits())
}

impl Ban {
    async fn run(&self, context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
        let Some(guild_id) = interaction.guild_id else {
            return crate::commands::error::run(
                context,
                interaction,
                "This command can only be used in servers!",
            )
            .await;
        };

        let allowed = interaction
            .member
            .as_ref()
            .and_then(|member| member.permissions)
            .is_some_and(|permissions| permissions.ban_members());
        if !allowed {
            return crate::commands::error::run(
                context,
                interaction,
                "You don't have permission to ban users!",
            )
            .await;
        }

        let mut target = None;
        let mut reason = None;
        let mut delete_days = 0;
        for option in interaction.data.options() {
            match option {
                ResolvedOption {
                    name: "user",
                    value: ResolvedValue::User(user, _),
                    ..
                } => target = Some(user.clone()),
                ResolvedOption {
                    name: "reason",
                    value: ResolvedValue::String(text),
                    ..
                } => reason = Some(text.to_string()),
                ResolvedOption {
                    name: "delete_messages",
                    value: ResolvedValue::Integer(days),
                    ..
                } => delete_days = days.clamp(0, MAX_DELETE_DAYS.into()) as u8,
                _ => {}
            }
        }

        let Some(user) = target else {
            return crate::commands::error::run(context, interaction, "Please choose a user to ban.")
                .await;
        };
        let reason = reason.unwrap_or_else(|| self.default_reason.clone());

        guild_id
            .ban_with_reason(&context.http, user.id, delete_days, &reason)
            .await?;
        tracing::info!("[CMD] {} banned from guild {}: {}", user.tag(), guild_id, reason);

        let response = CreateInteractionResponseMessage::new()
            .content(format!("{} was banned from the server.\nReason: {}", user.tag(), reason));
        interaction
            .create_response(&context.http, CreateInteractionResponse::Message(response))
            .await?;

        Ok(())
    }
}

#[serenity::async_trait]
impl Command for Ban {
    fn definition(&self) -> &CommandSchema {
        &self.definition
    }

    async fn execute(&self, context: &Context, interaction: &CommandInteraction) -> anyhow::Result<()> {
        self.run(context, interaction).await
    }
}
