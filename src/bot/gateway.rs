use serenity::all::{Context, Interaction, Member, Message, Ready};

/// A gateway event as delivered to event modules, with the client context.
#[derive(Clone)]
pub enum GatewayEvent {
    Ready { context: Context, ready: Ready },
    InteractionCreate { context: Context, interaction: Interaction },
    MessageCreate { context: Context, message: Message },
    GuildMemberAdd { context: Context, member: Member },
}

impl GatewayEvent {
    pub const READY: &'static str = "ready";
    pub const INTERACTION_CREATE: &'static str = "interactionCreate";
    pub const MESSAGE_CREATE: &'static str = "messageCreate";
    pub const GUILD_MEMBER_ADD: &'static str = "guildMemberAdd";

    /// Name listeners subscribe under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready { .. } => Self::READY,
            Self::InteractionCreate { .. } => Self::INTERACTION_CREATE,
            Self::MessageCreate { .. } => Self::MESSAGE_CREATE,
            Self::GuildMemberAdd { .. } => Self::GUILD_MEMBER_ADD,
        }
    }
}
