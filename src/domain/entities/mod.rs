//! Domain entities - Core objects the dispatch core works with

pub mod command;
pub mod lifecycle;
pub mod message;
pub mod user;

pub use command::{CommandHandler, CommandRegistry, FnHandler, ParseResult, ParsedCommand};
pub use lifecycle::{Connectivity, LifecycleState, Presence, Transition};
pub use message::Message;
pub use user::User;
