use crate::bot::GatewayEvent;
use crate::host::Event;

pub struct GuildMemberAddEvent;

#[serenity::async_trait]
impl Event<GatewayEvent> for GuildMemberAddEvent {
    fn name(&self) -> &str {
        GatewayEvent::GUILD_MEMBER_ADD
    }

    async fn execute(&self, args: &GatewayEvent) -> anyhow::Result<()> {
        if let GatewayEvent::GuildMemberAdd { context, member } = args {
            let guild = member
                .guild_id
                .name(&context.cache)
                .unwrap_or_else(|| member.guild_id.to_string());
            tracing::info!("[EVENT] {} joined {}", member.user.tag(), guild);
        }
        Ok(())
    }
}
