use std::sync::Arc;

use anyhow::anyhow;
use serenity::all::Context;
use serenity::prelude::TypeMapKey;

use crate::bot::gateway::GatewayEvent;
use crate::host::{CommandRegistry, CommandSynchronizer, EventRegistry};
use crate::utils::config::Config;

/// Shared state reachable from every handler through the client's data map.
pub struct BotState {
    pub config: Arc<Config>,
    pub commands: Arc<CommandRegistry>,
    pub events: Arc<EventRegistry<GatewayEvent>>,
    pub synchronizer: CommandSynchronizer,
}

impl TypeMapKey for BotState {
    type Value = Arc<BotState>;
}

impl BotState {
    pub async fn from_context(context: &Context) -> anyhow::Result<Arc<BotState>> {
        context
            .data
            .read()
            .await
            .get::<BotState>()
            .cloned()
            .ok_or_else(|| anyhow!("Bot state is missing from the client data"))
    }
}
