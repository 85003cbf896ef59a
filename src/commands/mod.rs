pub mod ban;
pub mod error;
pub mod help;
pub mod ping;
