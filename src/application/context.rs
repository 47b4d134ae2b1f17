//! Bot context - the state every handler and plugin sees

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandRegistry, LifecycleState, Message};
use crate::domain::traits::Client;
use crate::infrastructure::config::Config;
use crate::plugins::Plugin;

/// Signals the dispatch loop to stop taking new events
#[derive(Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate root owned by the dispatcher for the lifetime of the bot.
///
/// Handlers get `&BotContext`; only plugins during initialization and the
/// dispatcher itself get `&mut`.
pub struct BotContext {
    pub config: Config,
    pub lifecycle: LifecycleState,
    pub commands: CommandRegistry,
    pub plugins: Vec<Arc<dyn Plugin>>,
    client: Arc<dyn Client>,
    shutdown: ShutdownHandle,
}

impl BotContext {
    pub fn new(config: Config, commands: CommandRegistry, client: Arc<dyn Client>) -> Self {
        Self {
            config,
            lifecycle: LifecycleState::new(),
            commands,
            plugins: Vec::new(),
            client,
            shutdown: ShutdownHandle::new(),
        }
    }

    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    pub fn shutdown_handle(&self) -> &ShutdownHandle {
        &self.shutdown
    }

    pub fn prefix(&self) -> &str {
        &self.config.bot.prefix
    }

    /// Send `text` to the channel `message` came from
    pub async fn reply(&self, message: &Message, text: &str) -> Result<String, CommandError> {
        self.client
            .send_message(&message.channel_id, text)
            .await
            .map_err(|e| CommandError::Reply(e.to_string()))
    }
}
