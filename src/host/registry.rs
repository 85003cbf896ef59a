use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use super::catalog::ModuleCatalog;
use super::handler::{Command, Event, Handler};
use super::loader::{Loader, ModuleDescriptor, is_module_file};

pub type CommandRegistry = HandlerRegistry<dyn Command>;
pub type EventRegistry<A> = HandlerRegistry<dyn Event<A>>;

/// Outcome of one registry rebuild.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Handlers dropped because an earlier module already claimed the name.
    pub duplicates: usize,
    /// Modules whose constructor failed.
    pub failed: usize,
    /// Modules of another kind, or disabled.
    pub skipped: usize,
}

struct Entries<T: ?Sized> {
    handlers: HashMap<String, Arc<T>>,
    categories: HashMap<String, String>,
}

impl<T: ?Sized> Default for Entries<T> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            categories: HashMap::new(),
        }
    }
}

/// Name-indexed store of handlers of one kind, rebuilt from a module tree.
///
/// Reads and the administrative `set`/`delete` go through an internal lock,
/// so the registry can be shared behind an `Arc` with the dispatch bridge.
pub struct HandlerRegistry<T: ?Sized> {
    label: &'static str,
    loader: Loader,
    directory: PathBuf,
    catalog: ModuleCatalog<T>,
    entries: RwLock<Entries<T>>,
}

impl<T: ?Sized + Handler + 'static> HandlerRegistry<T> {
    pub fn new(
        label: &'static str,
        loader: Loader,
        directory: impl Into<PathBuf>,
        catalog: ModuleCatalog<T>,
    ) -> Self {
        Self {
            label,
            loader,
            directory: directory.into(),
            catalog,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Rescans the module directory and replaces the whole registry.
    ///
    /// Every failure is recovered per module, so this never fails as a whole.
    pub fn load(&self) -> LoadReport {
        tracing::debug!(
            "[REGISTRY] Scanning {} for {}s ({} factories known)",
            self.directory.display(),
            self.label,
            self.catalog.len()
        );
        let descriptors =
            self.loader
                .discover_with_category(&self.directory, is_module_file, &self.catalog);
        self.rebuild(descriptors)
    }

    /// Instantiates `descriptors` into a fresh map and swaps it in.
    ///
    /// The first handler to claim a name keeps it.
    pub fn rebuild(&self, descriptors: Vec<ModuleDescriptor<T>>) -> LoadReport {
        let mut report = LoadReport::default();
        let mut fresh = Entries::default();

        for descriptor in descriptors {
            let handler = match descriptor.payload.materialize() {
                Ok(Some(handler)) => handler,
                Ok(None) => {
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(
                        "[REGISTRY] Failed to instantiate {} from {}: {:#}",
                        self.label,
                        descriptor.path.display(),
                        e
                    );
                    continue;
                }
            };

            let name = handler.name().to_string();
            if fresh.handlers.contains_key(&name) {
                report.duplicates += 1;
                tracing::warn!(
                    "[REGISTRY] Duplicate {} ignored: {} ({})",
                    self.label,
                    name,
                    descriptor.path.display()
                );
                continue;
            }

            if let Some(category) = descriptor.category {
                fresh.categories.insert(name.clone(), category);
            }
            fresh.handlers.insert(name, handler);
        }

        report.loaded = fresh.handlers.len();
        let mut names: Vec<&str> = fresh.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        if report.loaded > 0 {
            tracing::info!(
                "[REGISTRY] {} {}(s) loaded: {}",
                report.loaded,
                self.label,
                names.join(", ")
            );
        } else {
            tracing::info!("[REGISTRY] 0 {}(s) loaded", self.label);
        }

        *self.entries.write() = fresh;
        report
    }

    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.entries.read().handlers.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.read().handlers.contains_key(name)
    }

    /// Administrative override; replaces any existing entry.
    pub fn set(&self, name: impl Into<String>, handler: Arc<T>) {
        let name = name.into();
        let mut entries = self.entries.write();
        entries.categories.remove(&name);
        entries.handlers.insert(name, handler);
    }

    pub fn delete(&self, name: &str) -> bool {
        let mut entries = self.entries.write();
        entries.categories.remove(name);
        entries.handlers.remove(name).is_some()
    }

    pub fn size(&self) -> usize {
        self.entries.read().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get_all(&self) -> HashMap<String, Arc<T>> {
        self.entries.read().handlers.clone()
    }

    pub fn category(&self, name: &str) -> Option<String> {
        self.entries.read().categories.get(name).cloned()
    }

    /// Handler names grouped by category, uncategorized first, names sorted.
    pub fn grouped(&self) -> BTreeMap<Option<String>, Vec<String>> {
        let entries = self.entries.read();
        let mut groups: BTreeMap<Option<String>, Vec<String>> = BTreeMap::new();
        for name in entries.handlers.keys() {
            groups
                .entry(entries.categories.get(name).cloned())
                .or_default()
                .push(name.clone());
        }
        for names in groups.values_mut() {
            names.sort();
        }
        groups
    }
}
