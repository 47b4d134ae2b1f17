//! Plugin manager - keeps plugins in order and runs their initialization hooks

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::context::BotContext;
use crate::application::errors::BotError;
use crate::infrastructure::config::PluginInitOrder;
use crate::plugins::trait_def::Plugin;

/// Ordered list of plugins supplied at startup
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plugin. Names must be unique.
    pub fn register<P: Plugin + 'static>(&mut self, plugin: P) -> Result<(), BotError> {
        self.register_arc(Arc::new(plugin))
    }

    pub fn register_arc(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), BotError> {
        if self.has_plugin(plugin.name()) {
            return Err(BotError::Plugin(format!(
                "Plugin '{}' already registered",
                plugin.name()
            )));
        }

        info!("Registering plugin: {}", plugin.name());
        self.plugins.push(plugin);
        Ok(())
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Run every plugin's hooks against `ctx`, then hand the list to the context.
    ///
    /// The first hook error stops initialization.
    pub fn initialize(self, ctx: &mut BotContext, order: PluginInitOrder) -> Result<(), BotError> {
        match order {
            PluginInitOrder::Interleaved => {
                for plugin in &self.plugins {
                    pre_initialize(plugin, ctx)?;
                    post_initialize(plugin, ctx)?;
                }
            }
            PluginInitOrder::Batched => {
                for plugin in &self.plugins {
                    pre_initialize(plugin, ctx)?;
                }
                for plugin in &self.plugins {
                    post_initialize(plugin, ctx)?;
                }
            }
        }

        info!("Plugin system initialized with {} plugins", self.plugins.len());
        ctx.plugins.extend(self.plugins);
        Ok(())
    }
}

fn pre_initialize(plugin: &Arc<dyn Plugin>, ctx: &mut BotContext) -> Result<(), BotError> {
    debug!("Plugin {}: pre-initialize", plugin.name());
    plugin
        .pre_initialize(ctx)
        .map_err(|e| BotError::Plugin(format!("{} pre-initialize: {}", plugin.name(), e)))
}

fn post_initialize(plugin: &Arc<dyn Plugin>, ctx: &mut BotContext) -> Result<(), BotError> {
    debug!("Plugin {}: post-initialize", plugin.name());
    plugin
        .post_initialize(ctx)
        .map_err(|e| BotError::Plugin(format!("{} post-initialize: {}", plugin.name(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::entities::{CommandRegistry, FnHandler};
    use crate::domain::traits::{BotInfo, Client};
    use crate::infrastructure::config::Config;

    struct NullClient;

    #[async_trait]
    impl Client for NullClient {
        async fn login(&self, _token: &str) -> Result<String, BotError> {
            Ok("null".to_string())
        }

        async fn send_message(&self, _channel_id: &str, _text: &str) -> Result<String, BotError> {
            Ok(String::new())
        }

        async fn destroy(&self) -> Result<(), BotError> {
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                id: "0".to_string(),
                name: "null".to_string(),
                username: "null".to_string(),
            }
        }
    }

    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
        fail_pre: bool,
    }

    impl Recorder {
        fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                name: name.to_string(),
                log: Arc::clone(log),
                fail_pre: false,
            }
        }
    }

    impl Plugin for Recorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn pre_initialize(&self, ctx: &mut BotContext) -> Result<(), BotError> {
            self.log.lock().unwrap().push(format!("{}:pre", self.name));
            if self.fail_pre {
                return Err(BotError::Internal("boom".to_string()));
            }
            ctx.commands
                .register(self.name.clone(), Arc::new(FnHandler::new(|_, _, _| Ok(()))));
            Ok(())
        }

        fn post_initialize(&self, _ctx: &mut BotContext) -> Result<(), BotError> {
            self.log.lock().unwrap().push(format!("{}:post", self.name));
            Ok(())
        }
    }

    fn context() -> BotContext {
        BotContext::new(Config::default(), CommandRegistry::new(), Arc::new(NullClient))
    }

    fn manager(log: &Arc<Mutex<Vec<String>>>) -> PluginManager {
        let mut manager = PluginManager::new();
        manager.register(Recorder::new("a", log)).unwrap();
        manager.register(Recorder::new("b", log)).unwrap();
        manager
    }

    #[test]
    fn test_interleaved_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = context();

        manager(&log).initialize(&mut ctx, PluginInitOrder::Interleaved).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a:pre", "a:post", "b:pre", "b:post"]);
        assert_eq!(ctx.plugins.len(), 2);
        assert!(ctx.commands.contains("a"));
        assert!(ctx.commands.contains("b"));
    }

    #[test]
    fn test_batched_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut ctx = context();

        manager(&log).initialize(&mut ctx, PluginInitOrder::Batched).unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["a:pre", "b:pre", "a:post", "b:post"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = manager(&log);

        let err = manager.register(Recorder::new("a", &log)).unwrap_err();
        assert!(matches!(err, BotError::Plugin(_)));
        assert_eq!(manager.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_hook_error_stops_initialization() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut failing = Recorder::new("a", &log);
        failing.fail_pre = true;

        let mut manager = PluginManager::new();
        manager.register(failing).unwrap();
        manager.register(Recorder::new("b", &log)).unwrap();

        let mut ctx = context();
        let err = manager.initialize(&mut ctx, PluginInitOrder::Interleaved).unwrap_err();

        assert!(err.to_string().contains("a pre-initialize"));
        assert_eq!(*log.lock().unwrap(), vec!["a:pre"]);
        assert!(ctx.plugins.is_empty());
    }
}
