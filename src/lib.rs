//! ybot - command routing and dispatch for chat-platform bots
//!
//! A platform client pushes events into a channel; the dispatcher turns
//! lifecycle events into state transitions and prefixed messages into calls
//! to the handlers registered under the command name.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;

pub use application::bot::Bot;
pub use application::context::{BotContext, ShutdownHandle};
pub use application::errors::{BotError, CommandError, ConfigError};
pub use application::messaging::{parse, CommandParser, DispatchOutcome, Dispatcher};
pub use domain::entities::{
    CommandHandler, CommandRegistry, Connectivity, FnHandler, LifecycleState, Message,
    ParseResult, ParsedCommand, Presence, Transition, User,
};
pub use domain::traits::{BotInfo, Client, ClientEvent, EventReceiver, EventSender};
pub use infrastructure::config::Config;
pub use plugins::{Plugin, PluginManager};
