mod bot;
mod commands;
mod events;
mod host;
mod tests;
mod utils;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::utils::config::Config;

#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(about = "Discord bot host with file-declared command and event modules")]
struct Args {
    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Mode {
    /// Connect to the gateway and serve commands (default)
    Run,
    /// Sync the command modules with the platform once, then exit
    Register,
    /// Delete every registered command in the configured scope, then exit
    Purge,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "debug,serenity=info"
    } else {
        "info,serenity=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("[INIT] {:?}", config);

    match args.mode.unwrap_or(Mode::Run) {
        Mode::Run => bot::init::start_bot(config).await,
        Mode::Register => bot::init::register_commands(config).await,
        Mode::Purge => bot::init::purge_commands(config).await,
    }
}
