use std::fmt;

use thiserror::Error;

use super::schema::CommandSchema;
use crate::utils::config::Config;

/// Where command definitions are registered on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    Guild(u64),
}

impl CommandScope {
    /// Guild scope only when guild registration is switched on *and* a guild is set.
    pub fn from_config(config: &Config) -> Self {
        match (config.register_guild_commands, config.test_guild_id) {
            (true, Some(guild_id)) => Self::Guild(guild_id),
            _ => Self::Global,
        }
    }
}

impl fmt::Display for CommandScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Guild(id) => write!(f, "guild:{id}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Network error: {0}")]
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    Network(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{method} {path} failed with {status}: {message}")]
    /// The platform answered with a non-success status.
    Api {
        status: u16,
        code: Option<u64>,
        message: String,
        method: String,
        path: String,
    },
}

impl PlatformError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|status| status.as_u16()),
            Self::Url(_) => None,
        }
    }
}

/// Remote command management capability of the platform client.
#[serenity::async_trait]
pub trait CommandApi: Send + Sync {
    async fn fetch_commands(&self, scope: CommandScope) -> Result<Vec<CommandSchema>, PlatformError>;

    /// Bulk-overwrites the scope with `commands` and returns what the platform stored.
    async fn replace_commands(
        &self,
        scope: CommandScope,
        commands: &[CommandSchema],
    ) -> Result<Vec<CommandSchema>, PlatformError>;

    async fn delete_all_commands(&self, scope: CommandScope) -> Result<(), PlatformError>;
}
