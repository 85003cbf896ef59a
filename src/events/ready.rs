use crate::bot::{BotState, GatewayEvent};
use crate::host::Event;

/// Logs the connection and brings the platform's command set up to date.
pub struct ReadyEvent;

#[serenity::async_trait]
impl Event<GatewayEvent> for ReadyEvent {
    fn name(&self) -> &str {
        GatewayEvent::READY
    }

    fn once(&self) -> bool {
        true
    }

    async fn execute(&self, args: &GatewayEvent) -> anyhow::Result<()> {
        let GatewayEvent::Ready { context, ready } = args else {
            return Ok(());
        };

        tracing::info!("[EVENT] {} is ready and connected!", ready.user.name);
        tracing::info!("[EVENT] Guilds: {}", ready.guilds.len());

        let state = BotState::from_context(context).await?;
        tracing::info!(
            "[EVENT] Application {}: {} command(s), {} event(s)",
            state.config.client_id,
            state.commands.size(),
            state.events.size()
        );

        // A failed sync leaves the bot running with whatever the platform has.
        if let Err(e) = state.synchronizer.execute(&state.commands).await {
            tracing::error!("[EVENT] Command registration failed: {}", e);
        }

        Ok(())
    }
}
