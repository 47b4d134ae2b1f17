//! Plugin trait definitions

use crate::application::context::BotContext;
use crate::application::errors::BotError;

/// Core plugin trait that all plugins must implement
pub trait Plugin: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &str;

    /// Runs before the plugin's `post_initialize`, after built-in commands are registered
    fn pre_initialize(&self, _ctx: &mut BotContext) -> Result<(), BotError> {
        Ok(())
    }

    fn post_initialize(&self, _ctx: &mut BotContext) -> Result<(), BotError> {
        Ok(())
    }
}
