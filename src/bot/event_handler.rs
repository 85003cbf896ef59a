use std::sync::Arc;

use serenity::all::{Context, Interaction, Member, Message, Ready};
use serenity::prelude::*;

use crate::bot::gateway::GatewayEvent;
use crate::host::EventEmitter;

/// Feeds serenity's gateway callbacks into the event subscription table.
pub struct GatewayForwarder {
    emitter: Arc<EventEmitter<GatewayEvent>>,
}

impl GatewayForwarder {
    pub fn new(emitter: Arc<EventEmitter<GatewayEvent>>) -> Self {
        Self { emitter }
    }

    async fn forward(&self, event: GatewayEvent) {
        let name = event.name();
        let delivered = self.emitter.emit(name, event).await;
        if delivered == 0 {
            tracing::trace!("[EVENT] No listener for {}", name);
        }
    }
}

#[serenity::async_trait]
impl EventHandler for GatewayForwarder {
    async fn ready(&self, context: Context, ready: Ready) {
        self.forward(GatewayEvent::Ready { context, ready }).await;
    }

    async fn interaction_create(&self, context: Context, interaction: Interaction) {
        self.forward(GatewayEvent::InteractionCreate {
            context,
            interaction,
        })
        .await;
    }

    async fn message(&self, context: Context, message: Message) {
        self.forward(GatewayEvent::MessageCreate { context, message })
            .await;
    }

    async fn guild_member_addition(&self, context: Context, member: Member) {
        self.forward(GatewayEvent::GuildMemberAdd { context, member })
            .await;
    }
}
