use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use super::platform::{CommandApi, CommandScope, PlatformError};
use super::registry::CommandRegistry;
use super::schema::CommandSchema;
use crate::utils::config::Config;
use crate::utils::report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing registered locally; the platform was not contacted.
    Skipped,
    UpToDate(usize),
    Replaced(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStep {
    Fetch,
    Delete,
    Replace,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Delete => write!(f, "delete"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Command synchronization failed at {step} ({scope}): {source}")]
pub struct SyncError {
    pub step: SyncStep,
    pub scope: CommandScope,
    #[source]
    pub source: PlatformError,
}

/// Reconciles the local command registry with the platform's command set.
pub struct CommandSynchronizer {
    api: Arc<dyn CommandApi>,
    scope: CommandScope,
    settle_delay: Duration,
}

impl CommandSynchronizer {
    pub fn new(api: Arc<dyn CommandApi>, scope: CommandScope, settle_delay: Duration) -> Self {
        Self {
            api,
            scope,
            settle_delay,
        }
    }

    pub fn from_config(api: Arc<dyn CommandApi>, config: &Config) -> Self {
        Self::new(api, CommandScope::from_config(config), config.settle_delay)
    }

    pub fn scope(&self) -> CommandScope {
        self.scope
    }

    /// Runs one synchronization pass.
    ///
    /// The remote set is only touched when it differs from the local one, and
    /// then it is deleted and re-created in full. Failures are reported with
    /// diagnostics and returned; there is no retry.
    pub async fn execute(&self, commands: &CommandRegistry) -> Result<SyncOutcome, SyncError> {
        if commands.is_empty() {
            tracing::warn!("[SYNC] No commands found to register");
            return Ok(SyncOutcome::Skipped);
        }

        let local = serialize(commands);
        let result = self.push_if_changed(&local).await;
        if let Err(e) = &result {
            report::report_with_suggestions(
                &e.source,
                &format!("CommandSynchronizer::execute ({}, {})", e.step, e.scope),
            );
        }
        result
    }

    async fn push_if_changed(&self, local: &[CommandSchema]) -> Result<SyncOutcome, SyncError> {
        let remote = self
            .api
            .fetch_commands(self.scope)
            .await
            .map_err(|source| self.failure(SyncStep::Fetch, source))?;

        if !has_changed(&remote, local) {
            tracing::info!(
                "[SYNC] Commands already up to date ({}, {} command(s))",
                self.scope,
                local.len()
            );
            return Ok(SyncOutcome::UpToDate(local.len()));
        }

        tracing::info!(
            "[SYNC] Command set changed ({} remote, {} local), replacing {}",
            remote.len(),
            local.len(),
            self.scope
        );

        self.api
            .delete_all_commands(self.scope)
            .await
            .map_err(|source| self.failure(SyncStep::Delete, source))?;

        // The platform may not have propagated the delete yet.
        tokio::time::sleep(self.settle_delay).await;

        let stored = self
            .api
            .replace_commands(self.scope, local)
            .await
            .map_err(|source| self.failure(SyncStep::Replace, source))?;

        tracing::info!(
            "[SYNC] Successfully registered {} command(s) ({})",
            stored.len(),
            self.scope
        );
        Ok(SyncOutcome::Replaced(local.len()))
    }

    /// Removes every command registered in this scope; returns how many there were.
    pub async fn purge(&self) -> Result<usize, SyncError> {
        let remote = self
            .api
            .fetch_commands(self.scope)
            .await
            .map_err(|source| self.failure(SyncStep::Fetch, source))?;

        if remote.is_empty() {
            tracing::info!("[SYNC] No commands registered ({})", self.scope);
            return Ok(0);
        }

        self.api
            .delete_all_commands(self.scope)
            .await
            .map_err(|source| self.failure(SyncStep::Delete, source))?;

        tracing::info!("[SYNC] Deleted {} command(s) ({})", remote.len(), self.scope);
        Ok(remote.len())
    }

    fn failure(&self, step: SyncStep, source: PlatformError) -> SyncError {
        SyncError {
            step,
            scope: self.scope,
            source,
        }
    }
}

/// Local command definitions, ordered by name.
pub fn serialize(commands: &CommandRegistry) -> Vec<CommandSchema> {
    let mut definitions: Vec<CommandSchema> = commands
        .get_all()
        .values()
        .map(|command| command.definition().clone())
        .collect();
    definitions.sort_by(|a, b| a.name.cmp(&b.name));
    definitions
}

/// Whether the remote command set must be replaced to match `local`.
///
/// Descriptions must match exactly and option lists structurally, in order.
/// A remote name with no local counterpart is a change even when the counts
/// line up, so the comparison holds for inputs that repeat names.
pub fn has_changed(remote: &[CommandSchema], local: &[CommandSchema]) -> bool {
    if remote.len() != local.len() {
        return true;
    }

    let by_name: HashMap<&str, &CommandSchema> =
        remote.iter().map(|command| (command.name.as_str(), command)).collect();

    for command in local {
        let Some(existing) = by_name.get(command.name.as_str()) else {
            return true;
        };
        if existing.description != command.description || existing.options != command.options {
            return true;
        }
    }

    let local_names: HashSet<&str> = local.iter().map(|command| command.name.as_str()).collect();
    remote
        .iter()
        .any(|command| !local_names.contains(command.name.as_str()))
}
