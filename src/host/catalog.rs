use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::loader::{LoadError, Materialize, ModulePayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Command,
    Event,
}

/// Contents of a module file on disk.
///
/// ```toml
/// kind = "event"
/// factory = "message_create"
///
/// [settings]
/// trigger = "hello"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleManifest {
    pub kind: ModuleKind,
    pub factory: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub settings: toml::Table,
}

fn enabled_by_default() -> bool {
    true
}

impl ModuleManifest {
    pub fn setting_str(&self, key: &str) -> Option<&str> {
        self.settings.get(key).and_then(|value| value.as_str())
    }
}

pub type BuildFn<T> = fn(&ModuleManifest) -> anyhow::Result<Arc<T>>;

pub enum Factory<T: ?Sized> {
    /// Built per manifest, so settings can shape the handler.
    Construct(BuildFn<T>),
    /// Shared as-is; settings are ignored.
    Instance(Arc<T>),
}

/// Compiled-in table from factory key to handler factory, for one module kind.
pub struct ModuleCatalog<T: ?Sized> {
    kind: ModuleKind,
    factories: HashMap<String, Factory<T>>,
}

impl<T: ?Sized> ModuleCatalog<T> {
    pub fn new(kind: ModuleKind) -> Self {
        Self {
            kind,
            factories: HashMap::new(),
        }
    }

    pub fn construct(mut self, key: &str, build: BuildFn<T>) -> Self {
        self.factories.insert(key.to_string(), Factory::Construct(build));
        self
    }

    pub fn instance(mut self, key: &str, handler: Arc<T>) -> Self {
        self.factories.insert(key.to_string(), Factory::Instance(handler));
        self
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }
}

impl<T: ?Sized + 'static> Materialize<T> for ModuleCatalog<T> {
    fn materialize(&self, path: &Path) -> Result<ModulePayload<T>, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: ModuleManifest = toml::from_str(&raw).map_err(|source| LoadError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

        if manifest.kind != self.kind || !manifest.enabled {
            return Ok(ModulePayload::Unsupported);
        }

        match self.factories.get(&manifest.factory) {
            Some(Factory::Construct(build)) => {
                let build = *build;
                Ok(ModulePayload::Construct(Box::new(move || build(&manifest))))
            }
            Some(Factory::Instance(handler)) => Ok(ModulePayload::Instance(Arc::clone(handler))),
            None => Err(LoadError::UnknownFactory {
                path: path.to_path_buf(),
                factory: manifest.factory,
            }),
        }
    }
}
