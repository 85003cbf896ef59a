pub mod command_handler;
