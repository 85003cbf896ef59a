//! Fakes and fixtures shared by the test modules.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::bail;
use parking_lot::Mutex;
use serenity::all::{CommandInteraction, Context};

use crate::host::platform::{CommandApi, CommandScope, PlatformError};
use crate::host::{
    Command, CommandRegistry, CommandSchema, Event, EventRegistry, Loader, ModuleCatalog,
    ModuleKind, ModuleManifest,
};

pub fn write_module(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

pub fn command_manifest(factory: &str) -> String {
    format!("kind = \"command\"\nfactory = \"{factory}\"\n")
}

pub struct TestCommand {
    definition: CommandSchema,
}

impl TestCommand {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            definition: CommandSchema::new(name, description),
        }
    }

    pub fn with_definition(definition: CommandSchema) -> Self {
        Self { definition }
    }
}

#[serenity::async_trait]
impl Command for TestCommand {
    fn definition(&self) -> &CommandSchema {
        &self.definition
    }

    async fn execute(&self, _context: &Context, _interaction: &CommandInteraction) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Builds a command from `settings.name` / `settings.description`.
pub fn build_configured(manifest: &ModuleManifest) -> anyhow::Result<Arc<dyn Command>> {
    let Some(name) = manifest.setting_str("name") else {
        bail!("settings.name is required");
    };
    let description = manifest.setting_str("description").unwrap_or("configured");
    Ok(Arc::new(TestCommand::new(name, description)))
}

pub fn command_catalog() -> ModuleCatalog<dyn Command> {
    ModuleCatalog::<dyn Command>::new(ModuleKind::Command)
        .instance("ping", Arc::new(TestCommand::new("ping", "p")))
        .instance("help", Arc::new(TestCommand::new("help", "h")))
        .construct("configured", build_configured)
}

pub fn command_registry(root: &Path) -> CommandRegistry {
    CommandRegistry::new("command", Loader::new(root), "commands", command_catalog())
}

/// Registry with no module tree behind it, filled through `set`.
pub fn commands_from(definitions: Vec<CommandSchema>) -> CommandRegistry {
    let registry = CommandRegistry::new(
        "command",
        Loader::new("does-not-exist"),
        "commands",
        ModuleCatalog::new(ModuleKind::Command),
    );
    for definition in definitions {
        let name = definition.name.clone();
        registry.set(name, Arc::new(TestCommand::with_definition(definition)));
    }
    registry
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
}

/// Event handler that counts its invocations and records the arguments it saw.
pub struct TestEvent {
    name: String,
    once: bool,
    behavior: Behavior,
    pub calls: AtomicUsize,
    pub seen: Mutex<Vec<String>>,
}

impl TestEvent {
    pub fn new(name: &str, once: bool, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            once,
            behavior,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[serenity::async_trait]
impl Event<String> for TestEvent {
    fn name(&self) -> &str {
        &self.name
    }

    fn once(&self) -> bool {
        self.once
    }

    async fn execute(&self, args: &String) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(args.clone());
        match self.behavior {
            Behavior::Succeed => Ok(()),
            Behavior::Fail => bail!("{} failed on purpose", self.name),
            Behavior::Panic => panic!("{} panicked on purpose", self.name),
        }
    }
}

pub fn event_registry() -> Arc<EventRegistry<String>> {
    Arc::new(EventRegistry::new(
        "event",
        Loader::new("does-not-exist"),
        "events",
        ModuleCatalog::new(ModuleKind::Event),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCall {
    Fetch,
    Delete,
    Replace,
}

/// In-memory command API recording every call with its time.
pub struct FakeCommandApi {
    pub remote: Mutex<Vec<CommandSchema>>,
    pub calls: Mutex<Vec<(ApiCall, CommandScope, Instant)>>,
    pub replaced_with: Mutex<Option<Vec<CommandSchema>>>,
    fail_on: Option<ApiCall>,
}

impl FakeCommandApi {
    pub fn new(remote: Vec<CommandSchema>) -> Arc<Self> {
        Arc::new(Self {
            remote: Mutex::new(remote),
            calls: Mutex::new(Vec::new()),
            replaced_with: Mutex::new(None),
            fail_on: None,
        })
    }

    pub fn failing_on(remote: Vec<CommandSchema>, call: ApiCall) -> Arc<Self> {
        Arc::new(Self {
            remote: Mutex::new(remote),
            calls: Mutex::new(Vec::new()),
            replaced_with: Mutex::new(None),
            fail_on: Some(call),
        })
    }

    pub fn call_kinds(&self) -> Vec<ApiCall> {
        self.calls.lock().iter().map(|(call, _, _)| *call).collect()
    }

    fn record(&self, call: ApiCall, scope: CommandScope) -> Result<(), PlatformError> {
        self.calls.lock().push((call, scope, Instant::now()));
        if self.fail_on == Some(call) {
            return Err(PlatformError::Api {
                status: 503,
                code: None,
                message: "Service Unavailable".to_string(),
                method: "PUT".to_string(),
                path: "/applications/1/commands".to_string(),
            });
        }
        Ok(())
    }
}

#[serenity::async_trait]
impl CommandApi for FakeCommandApi {
    async fn fetch_commands(&self, scope: CommandScope) -> Result<Vec<CommandSchema>, PlatformError> {
        self.record(ApiCall::Fetch, scope)?;
        Ok(self.remote.lock().clone())
    }

    async fn replace_commands(
        &self,
        scope: CommandScope,
        commands: &[CommandSchema],
    ) -> Result<Vec<CommandSchema>, PlatformError> {
        self.record(ApiCall::Replace, scope)?;
        *self.remote.lock() = commands.to_vec();
        *self.replaced_with.lock() = Some(commands.to_vec());
        Ok(commands.to_vec())
    }

    async fn delete_all_commands(&self, scope: CommandScope) -> Result<(), PlatformError> {
        self.record(ApiCall::Delete, scope)?;
        self.remote.lock().clear();
        Ok(())
    }
}
