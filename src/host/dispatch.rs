use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::emitter::{EventSource, Listener};
use super::registry::EventRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed,
    /// The handler returned an error or panicked; already logged.
    Failed,
    /// No handler is registered under the name any more.
    Missing,
}

/// Bridges an [`EventSource`] to the handlers in an [`EventRegistry`].
pub struct EventDispatcher<A: Send + Sync + 'static> {
    events: Arc<EventRegistry<A>>,
}

impl<A: Send + Sync + 'static> EventDispatcher<A> {
    pub fn new(events: Arc<EventRegistry<A>>) -> Arc<Self> {
        Arc::new(Self { events })
    }

    /// Subscribes one listener per registered event name and returns the count.
    ///
    /// Listeners hold only the name; the handler is looked up again on every
    /// delivery so later `set`/`delete` calls on the registry take effect.
    pub fn bind(self: &Arc<Self>, source: &dyn EventSource<A>) -> usize {
        let mut bindings: Vec<(String, bool)> = self
            .events
            .get_all()
            .into_iter()
            .map(|(name, event)| (name, event.once()))
            .collect();
        bindings.sort();

        for (name, once) in &bindings {
            let dispatcher = Arc::clone(self);
            let event_name = name.clone();
            let listener: Listener<A> = Arc::new(move |args: A| {
                let dispatcher = Arc::clone(&dispatcher);
                let event_name = event_name.clone();
                async move {
                    dispatcher.handle(&event_name, args).await;
                }
                .boxed()
            });

            if *once {
                source.subscribe_once(name, listener);
            } else {
                source.subscribe_recurring(name, listener);
            }
            tracing::debug!("[DISPATCH] Bound {} (once: {})", name, once);
        }

        tracing::info!("[DISPATCH] {} event(s) bound", bindings.len());
        bindings.len()
    }

    /// Runs the handler currently registered for `event_name`.
    ///
    /// Errors and panics stop here; they are logged and never reach the event source.
    pub async fn handle(&self, event_name: &str, args: A) -> DispatchOutcome {
        let Some(event) = self.events.get(event_name) else {
            return DispatchOutcome::Missing;
        };

        match AssertUnwindSafe(event.execute(&args)).catch_unwind().await {
            Ok(Ok(())) => DispatchOutcome::Completed,
            Ok(Err(e)) => {
                tracing::error!("[DISPATCH] Event handler {} failed: {:#}", event_name, e);
                DispatchOutcome::Failed
            }
            Err(panic) => {
                tracing::error!(
                    "[DISPATCH] Event handler {} panicked: {}",
                    event_name,
                    panic_message(panic.as_ref())
                );
                DispatchOutcome::Failed
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
