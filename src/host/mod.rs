//! Module registry and synchronization engine.
//!
//! Module files on disk are discovered by the [`loader`], resolved through a
//! compiled-in [`catalog`], and indexed by name in a [`registry`]. Event
//! handlers are bound to the platform through [`dispatch`]; command
//! definitions are reconciled with the platform by [`sync`].

pub mod catalog;
pub mod dispatch;
pub mod emitter;
pub mod handler;
pub mod loader;
pub mod platform;
pub mod registry;
pub mod schema;
pub mod sync;

pub use catalog::{ModuleCatalog, ModuleKind, ModuleManifest};
pub use dispatch::EventDispatcher;
pub use emitter::EventEmitter;
pub use handler::{Command, Event};
pub use loader::Loader;
pub use registry::{CommandRegistry, EventRegistry};
pub use schema::{CommandSchema, OptionKind, OptionSchema};
pub use sync::CommandSynchronizer;
