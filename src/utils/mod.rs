pub mod config;
pub mod discord;
pub mod report;
