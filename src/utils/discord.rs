use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::host::platform::{CommandApi, CommandScope, PlatformError};
use crate::host::schema::CommandSchema;
use crate::utils::config::Config;

/// REST client for the application command endpoints.
#[derive(Debug)]
pub struct DiscordRest {
    http_client: Client,
    base_url: Url,
    token: String,
    application_id: u64,
}

/// Error body the platform sends with non-success responses.
#[derive(Deserialize, Debug, Default)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<u64>,
    #[serde(default)]
    message: String,
}

impl DiscordRest {
    pub fn new(base_url: &str, token: impl Into<String>, application_id: u64) -> Result<Self, PlatformError> {
        Ok(DiscordRest {
            http_client: Client::new(),
            base_url: Url::parse(base_url)?,
            token: token.into(),
            application_id,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlatformError> {
        Self::new(&config.api_base_url, config.token.clone(), config.client_id)
    }

    /// Endpoint path, relative to the API base, for the scope's command list.
    pub fn commands_path(&self, scope: CommandScope) -> String {
        match scope {
            CommandScope::Global => format!("applications/{}/commands", self.application_id),
            CommandScope::Guild(guild_id) => format!(
                "applications/{}/guilds/{}/commands",
                self.application_id, guild_id
            ),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&[CommandSchema]>,
    ) -> Result<T, PlatformError> {
        let url = self.base_url.join(path)?;
        tracing::debug!("[REST] {} {}", method, url);

        let mut req = self
            .http_client
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("Bot {}", self.token));
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let error: ApiErrorBody = res.json().await.unwrap_or_default();
            let message = if error.message.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                error.message
            };
            return Err(PlatformError::Api {
                status: status.as_u16(),
                code: error.code,
                message,
                method: method.to_string(),
                path: format!("/{path}"),
            });
        }

        Ok(res.json().await?)
    }
}

#[serenity::async_trait]
impl CommandApi for DiscordRest {
    async fn fetch_commands(&self, scope: CommandScope) -> Result<Vec<CommandSchema>, PlatformError> {
        self.send(Method::GET, &self.commands_path(scope), None).await
    }

    async fn replace_commands(
        &self,
        scope: CommandScope,
        commands: &[CommandSchema],
    ) -> Result<Vec<CommandSchema>, PlatformError> {
        self.send(Method::PUT, &self.commands_path(scope), Some(commands))
            .await
    }

    /// Bulk-overwrites the scope with an empty list.
    async fn delete_all_commands(&self, scope: CommandScope) -> Result<(), PlatformError> {
        let _: Vec<CommandSchema> = self
            .send(Method::PUT, &self.commands_path(scope), Some(&[]))
            .await?;
        Ok(())
    }
}
