//! Plugin hooks for ybot
//!
//! Plugins are extension objects invoked at two fixed points while the bot is
//! assembled: before and after initialization. They may mutate the context,
//! e.g. to register additional commands.

pub mod manager;
pub mod trait_def;

pub use manager::PluginManager;
pub use trait_def::Plugin;
