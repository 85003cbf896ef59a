use std::sync::Arc;

use anyhow::{Context as _, Result};
use serenity::prelude::*;

use crate::bot::catalog;
use crate::bot::event_handler::GatewayForwarder;
use crate::bot::gateway::GatewayEvent;
use crate::bot::state::BotState;
use crate::host::{
    CommandRegistry, CommandSynchronizer, EventDispatcher, EventEmitter, EventRegistry, Loader,
};
use crate::utils::config::Config;
use crate::utils::discord::DiscordRest;

const COMMANDS_DIR: &str = "commands";
const EVENTS_DIR: &str = "events";

fn command_registry(config: &Config) -> CommandRegistry {
    CommandRegistry::new(
        "command",
        Loader::new(&config.modules_dir),
        COMMANDS_DIR,
        catalog::commands(),
    )
}

fn synchronizer(config: &Config) -> Result<CommandSynchronizer> {
    let api = DiscordRest::from_config(config).context("Failed to create the REST client")?;
    Ok(CommandSynchronizer::from_config(Arc::new(api), config))
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("[INIT] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Resolves with the name of the first shutdown signal received.
///
/// The SIGTERM handler is installed before this returns, so a signal sent
/// right after is not lost.
#[cfg(unix)]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = &'static str>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
        }
    })
}

#[cfg(not(unix))]
pub fn shutdown_signal() -> std::io::Result<impl Future<Output = &'static str>> {
    Ok(async {
        interrupt().await;
        "Ctrl-C"
    })
}

/// Initialize and start the Discord bot
pub async fn start_bot(config: Config) -> Result<()> {
    tracing::info!("[INIT] Starting switchboard");
    let config = Arc::new(config);

    tracing::info!("[INIT] Loading modules from {}", config.modules_dir.display());
    let commands = Arc::new(command_registry(&config));
    commands.load();

    let events: Arc<EventRegistry<GatewayEvent>> = Arc::new(EventRegistry::new(
        "event",
        Loader::new(&config.modules_dir),
        EVENTS_DIR,
        catalog::events(),
    ));
    events.load();

    // Bind only after both registries are fully loaded.
    let emitter: Arc<EventEmitter<GatewayEvent>> = Arc::new(EventEmitter::new());
    EventDispatcher::new(Arc::clone(&events)).bind(emitter.as_ref());

    let state = Arc::new(BotState {
        synchronizer: synchronizer(&config)?,
        config: Arc::clone(&config),
        commands,
        events,
    });

    let mut client = Client::builder(&config.token, config.intents())
        .event_handler(GatewayForwarder::new(emitter))
        .type_map_insert::<BotState>(state)
        .await
        .context("Error creating client")?;

    let shutdown = shutdown_signal().context("Failed to install the shutdown signal handler")?;
    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        let signal = shutdown.await;
        tracing::info!("[INIT] {} received, shutting down...", signal);
        shard_manager.shutdown_all().await;
    });

    tracing::info!("[INIT] Connecting to Discord...");
    if let Err(why) = client.start().await {
        tracing::error!("[ERROR] Discord client error: {why:?}");
        return Err(why.into());
    }

    Ok(())
}

/// Loads the command modules and runs one synchronization pass.
pub async fn register_commands(config: Config) -> Result<()> {
    let commands = command_registry(&config);
    commands.load();

    let outcome = synchronizer(&config)?.execute(&commands).await?;
    tracing::info!("[CMD] Registration finished: {:?}", outcome);
    Ok(())
}

/// Deletes every command registered in the configured scope.
pub async fn purge_commands(config: Config) -> Result<()> {
    let synchronizer = synchronizer(&config)?;
    tracing::info!("[CMD] Fetching registered commands ({})", synchronizer.scope());
    let deleted = synchronizer.purge().await?;
    tracing::info!("[CMD] Purge finished, {} command(s) removed", deleted);
    Ok(())
}
