//! Command handlers: bridge CLI args -> core monitor -> output formatting.

pub mod config_cmd;
pub mod poll;
pub mod watch;
