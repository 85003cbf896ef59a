use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, join_all};
use parking_lot::Mutex;

pub type Listener<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

/// Event binding capability of the platform client.
pub trait EventSource<A>: Send + Sync {
    /// The listener is detached after its first delivery.
    fn subscribe_once(&self, event: &str, listener: Listener<A>);

    fn subscribe_recurring(&self, event: &str, listener: Listener<A>);
}

struct Subscription<A> {
    listener: Listener<A>,
    once: bool,
}

/// Subscription table keyed by event name.
///
/// The gateway forwarder feeds every platform event through [`EventEmitter::emit`].
pub struct EventEmitter<A> {
    table: Mutex<HashMap<String, Vec<Subscription<A>>>>,
}

impl<A> Default for EventEmitter<A> {
    fn default() -> Self {
        Self {
            table: Mutex::new(HashMap::new()),
        }
    }
}

impl<A: Clone + Send + 'static> EventEmitter<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every listener subscribed to `event` concurrently and returns how many ran.
    ///
    /// Once-listeners are detached before they run, so a concurrent emit of
    /// the same event cannot deliver to them twice.
    pub async fn emit(&self, event: &str, args: A) -> usize {
        let listeners: Vec<Listener<A>> = {
            let mut table = self.table.lock();
            let Some(subscriptions) = table.get_mut(event) else {
                return 0;
            };
            let fired = subscriptions
                .iter()
                .map(|subscription| Arc::clone(&subscription.listener))
                .collect();
            subscriptions.retain(|subscription| !subscription.once);
            if subscriptions.is_empty() {
                table.remove(event);
            }
            fired
        };

        let count = listeners.len();
        join_all(listeners.into_iter().map(|listener| listener(args.clone()))).await;
        count
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.table.lock().get(event).map_or(0, Vec::len)
    }

    fn subscribe(&self, event: &str, listener: Listener<A>, once: bool) {
        self.table
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(Subscription { listener, once });
    }
}

impl<A: Clone + Send + 'static> EventSource<A> for EventEmitter<A> {
    fn subscribe_once(&self, event: &str, listener: Listener<A>) {
        self.subscribe(event, listener, true);
    }

    fn subscribe_recurring(&self, event: &str, listener: Listener<A>) {
        self.subscribe(event, listener, false);
    }
}
