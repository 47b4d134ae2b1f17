//! Adapters - Platform client implementations

pub mod console;
