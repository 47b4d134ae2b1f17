//! Application layer - Use cases and orchestration
//!
//! This layer contains:
//! - Bot: Assembly of registry, parser, plugins and dispatcher
//! - Context: State shared with handlers and plugins
//! - Services: Built-in commands
//! - Errors: Domain-specific errors
//! - Messaging: Command parsing and dispatching

pub mod bot;
pub mod context;
pub mod errors;
pub mod messaging;
pub mod services;
