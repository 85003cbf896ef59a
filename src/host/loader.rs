use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Deferred constructor produced by a `Factory::Construct` catalog entry.
pub type Constructor<T> = Box<dyn FnOnce() -> anyhow::Result<Arc<T>> + Send>;

/// What a discovered file turned into once it was resolved.
///
/// Resolved once at discovery time; consumers only call [`ModulePayload::materialize`].
pub enum ModulePayload<T: ?Sized> {
    Construct(Constructor<T>),
    Instance(Arc<T>),
    /// The file is a module, just not one of the kind being loaded.
    Unsupported,
}

impl<T: ?Sized> ModulePayload<T> {
    /// Returns `Ok(None)` for modules that don't offer this handler capability.
    pub fn materialize(self) -> anyhow::Result<Option<Arc<T>>> {
        match self {
            Self::Construct(build) => build().map(Some),
            Self::Instance(handler) => Ok(Some(handler)),
            Self::Unsupported => Ok(None),
        }
    }
}

pub struct ModuleDescriptor<T: ?Sized> {
    pub path: PathBuf,
    /// Name of the subdirectory directly under the scan root, if any.
    pub category: Option<String>,
    pub payload: ModulePayload<T>,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed module manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{} refers to unknown factory `{factory}`", path.display())]
    UnknownFactory { path: PathBuf, factory: String },
}

/// Turns a single file into a payload.
pub trait Materialize<T: ?Sized> {
    fn materialize(&self, path: &Path) -> Result<ModulePayload<T>, LoadError>;
}

/// Module files are TOML manifests.
pub fn is_module_file(file_name: &str) -> bool {
    file_name.ends_with(".toml")
}

/// Stateless recursive directory scanner.
#[derive(Debug, Clone)]
pub struct Loader {
    base_path: PathBuf,
}

impl Loader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Scans `directory` (relative to the base path) depth-first.
    ///
    /// Files whose name fails `predicate` are ignored, and symlinked
    /// directories are not descended into. A file that fails to materialize
    /// is logged and skipped; it never stops the scan.
    pub fn discover<T, P, M>(
        &self,
        directory: impl AsRef<Path>,
        predicate: P,
        materializer: &M,
    ) -> Vec<ModuleDescriptor<T>>
    where
        T: ?Sized,
        P: Fn(&str) -> bool,
        M: Materialize<T> + ?Sized,
    {
        let mut modules = self.scan(directory.as_ref(), &predicate, materializer);
        for module in &mut modules {
            module.category = None;
        }
        modules
    }

    /// Same as [`Loader::discover`], but each descriptor records its category.
    pub fn discover_with_category<T, P, M>(
        &self,
        directory: impl AsRef<Path>,
        predicate: P,
        materializer: &M,
    ) -> Vec<ModuleDescriptor<T>>
    where
        T: ?Sized,
        P: Fn(&str) -> bool,
        M: Materialize<T> + ?Sized,
    {
        self.scan(directory.as_ref(), &predicate, materializer)
    }

    fn scan<T, P, M>(&self, directory: &Path, predicate: &P, materializer: &M) -> Vec<ModuleDescriptor<T>>
    where
        T: ?Sized,
        P: Fn(&str) -> bool,
        M: Materialize<T> + ?Sized,
    {
        let root = self.base_path.join(directory);
        let mut modules = Vec::new();

        if !root.is_dir() {
            tracing::error!("[LOADER] {}", LoadError::DirectoryMissing(root));
            return modules;
        }

        self.walk(&root, &root, predicate, materializer, &mut modules);

        tracing::debug!(
            "[LOADER] Discovered {} module(s) under {}",
            modules.len(),
            root.display()
        );
        modules
    }

    fn walk<T, P, M>(
        &self,
        dir: &Path,
        root: &Path,
        predicate: &P,
        materializer: &M,
        modules: &mut Vec<ModuleDescriptor<T>>,
    ) where
        T: ?Sized,
        P: Fn(&str) -> bool,
        M: Materialize<T> + ?Sized,
    {
        let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
            Ok(read) => read.filter_map(|entry| entry.ok().map(|e| e.path())).collect(),
            Err(e) => {
                tracing::error!("[LOADER] Failed to read directory {}: {}", dir.display(), e);
                return;
            }
        };
        entries.sort();

        for path in entries {
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::warn!("[LOADER] Skipping {}: {}", path.display(), e);
                    continue;
                }
            };

            // Linked directories can point back into the tree.
            if metadata.is_dir() && path.is_symlink() {
                tracing::debug!("[LOADER] Not following directory link {}", path.display());
                continue;
            }

            if metadata.is_dir() {
                self.walk(&path, root, predicate, materializer, modules);
                continue;
            }

            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(predicate);
            if !metadata.is_file() || !matches {
                continue;
            }

            match materializer.materialize(&path) {
                Ok(payload) => {
                    let category = category_of(&path, root);
                    modules.push(ModuleDescriptor {
                        path,
                        category,
                        payload,
                    });
                }
                Err(e) => tracing::warn!("[LOADER] Failed to load module: {}", e),
            }
        }
    }
}

fn category_of(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut components = relative.components();
    let first = components.next()?;
    // A bare file name means the module sits directly under the root.
    components.next()?;
    first.as_os_str().to_str().map(str::to_string)
}
