//! Domain layer - Core types and the ports the bot talks through
//!
//! This layer contains:
//! - Entities: Messages, parsed commands, the command registry, lifecycle state
//! - Traits: The platform client port

pub mod entities;
pub mod traits;
