pub(crate) mod catalog;
mod event_handler;
mod gateway;
mod state;

pub mod helpers;
pub mod init;

pub use gateway::GatewayEvent;
pub use state::BotState;
