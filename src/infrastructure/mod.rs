//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform client stand-ins and the operator console

pub mod adapters;
pub mod config;
