use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serenity::all::GatewayIntents;
use thiserror::Error;

const DEFAULT_MODULES_DIR: &str = "modules";
const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
const DEFAULT_API_URL: &str = "https://discord.com/api/v10/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in the environment or .env file")]
    Missing(&'static str),
    #[error("{key} must be {expected}, got `{value}`")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Process configuration, built once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    pub token: String,
    /// Application id the commands are registered under.
    pub client_id: u64,
    pub register_guild_commands: bool,
    pub test_guild_id: Option<u64>,
    pub modules_dir: PathBuf,
    pub settle_delay: Duration,
    pub api_base_url: String,
}

impl Config {
    /// Reads the process environment, including a `.env` file if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = get("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let client_id = get("CLIENT_ID").ok_or(ConfigError::Missing("CLIENT_ID"))?;
        let client_id = parse_id("CLIENT_ID", &client_id)?;

        let test_guild_id = get("TEST_GUILD_ID")
            .map(|value| parse_id("TEST_GUILD_ID", &value))
            .transpose()?;

        let settle_delay = match get("COMMAND_SETTLE_DELAY_MS") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "COMMAND_SETTLE_DELAY_MS",
                expected: "a number of milliseconds",
                value,
            })?,
            None => DEFAULT_SETTLE_DELAY_MS,
        };

        let mut api_base_url = get("DISCORD_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !api_base_url.ends_with('/') {
            api_base_url.push('/');
        }

        Ok(Config {
            token,
            client_id,
            register_guild_commands: get("REGISTER_GUILD_COMMANDS").as_deref() == Some("true"),
            test_guild_id,
            modules_dir: get("MODULES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULES_DIR)),
            settle_delay: Duration::from_millis(settle_delay),
            api_base_url,
        })
    }

    pub fn intents(&self) -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MEMBERS
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("register_guild_commands", &self.register_guild_commands)
            .field("test_guild_id", &self.test_guild_id)
            .field("modules_dir", &self.modules_dir)
            .field("settle_delay", &self.settle_delay)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn parse_id(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        expected: "a numeric id",
        value: value.to_string(),
    })
}
