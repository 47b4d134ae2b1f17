//! Message handling - Event-driven command dispatch

pub mod dispatcher;
pub mod parser;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use parser::{parse, CommandParser};
