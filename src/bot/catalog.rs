use std::sync::Arc;

use crate::bot::gateway::GatewayEvent;
use crate::host::{Command, Event, ModuleCatalog, ModuleKind};
use crate::{commands, events};

/// Every command a module file may refer to by factory key.
pub fn commands() -> ModuleCatalog<dyn Command> {
    ModuleCatalog::<dyn Command>::new(ModuleKind::Command)
        .instance("ping", Arc::new(commands::ping::Ping::new()))
        .instance("help", Arc::new(commands::help::Help::new()))
        .construct("ban", commands::ban::build)
}

/// Every event a module file may refer to by factory key.
pub fn events() -> ModuleCatalog<dyn Event<GatewayEvent>> {
    ModuleCatalog::<dyn Event<GatewayEvent>>::new(ModuleKind::Event)
        .instance("ready", Arc::new(events::ready::ReadyEvent))
        .instance(
            "interaction_create",
            Arc::new(events::interaction_create::InteractionCreateEvent),
        )
        .construct("message_create", events::message_create::build)
        .instance(
            "guild_member_add",
            Arc::new(events::guild_member_add::GuildMemberAddEvent),
        )
}
