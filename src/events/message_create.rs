use std::sync::Arc;

use crate::bot::GatewayEvent;
use crate::host::{Event, ModuleManifest};

const DEFAULT_TRIGGER: &str = "hello";
const DEFAULT_REPLY: &str = "Hello! How can I help?";

/// Replies to a fixed greeting.
pub struct MessageCreateEvent {
    trigger: String,
    reply: String,
}

/// Module factory; reads `settings.trigger` and `settings.reply`.
pub fn build(manifest: &ModuleManifest) -> anyhow::Result<Arc<dyn Event<GatewayEvent>>> {
    Ok(Arc::new(MessageCreateEvent::new(
        manifest.setting_str("trigger").unwrap_or(DEFAULT_TRIGGER),
        manifest.setting_str("reply").unwrap_or(DEFAULT_REPLY),
    )))
}

impl MessageCreateEvent {
    pub fn new(trigger: &str, reply: &str) -> Self {
        Self {
            trigger: trigger.to_lowercase(),
            reply: reply.to_string(),
        }
    }

    /// Case-insensitive, whole-message match.
    pub fn matches(&self, content: &str) -> bool {
        content.trim().to_lowercase() == self.trigger
    }
}

#[serenity::async_trait]
impl Event<GatewayEvent> for MessageCreateEvent {
    fn name(&self) -> &str {
        GatewayEvent::MESSAGE_CREATE
    }

    async fn execute(&self, args: &GatewayEvent) -> anyhow::Result<()> {
        let GatewayEvent::MessageCreate { context, message } = args else {
            return Ok(());
        };

        if message.author.bot || !self.matches(&message.content) {
            return Ok(());
        }

        message.reply(&context.http, &self.reply).await?;
        Ok(())
    }
}
