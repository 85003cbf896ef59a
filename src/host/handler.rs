use serenity::all::{CommandInteraction, Context};

use super::schema::CommandSchema;

/// Anything a [`HandlerRegistry`](super::registry::HandlerRegistry) can index.
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;
}

/// A slash command: a declarative definition plus the code that answers it.
#[serenity::async_trait]
pub trait Command: Send + Sync {
    fn definition(&self) -> &CommandSchema;

    async fn execute(&self, context: &Context, interaction: &CommandInteraction)
    -> anyhow::Result<()>;
}

/// A listener for one platform event name.
///
/// `A` is the argument bundle the event source hands to listeners.
#[serenity::async_trait]
pub trait Event<A: Send + Sync>: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the platform should detach this listener after its first delivery.
    fn once(&self) -> bool {
        false
    }

    async fn execute(&self, args: &A) -> anyhow::Result<()>;
}

impl Handler for dyn Command {
    fn name(&self) -> &str {
        &self.definition().name
    }
}

impl<A: Send + Sync + 'static> Handler for dyn Event<A> {
    fn name(&self) -> &str {
        <Self as Event<A>>::name(self)
    }
}
