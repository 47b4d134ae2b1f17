//! Application services - Built-in commands

pub mod command_service;

pub use command_service::{builtin_commands, HelpCommand, VersionCommand};
