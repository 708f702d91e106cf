//! CLI: 引数解析とサブコマンド

pub mod args;
pub mod command;

pub use args::{config_to_command, parse_args};
pub use command::CliCommand;
