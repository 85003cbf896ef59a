pub mod guild_member_add;
pub mod interaction_create;
pub mod message_create;
pub mod ready;
