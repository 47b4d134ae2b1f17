//! Bot assembly - wires registry, parser, plugins and dispatcher to an event source

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::context::{BotContext, ShutdownHandle};
use crate::application::errors::{BotError, ConfigError};
use crate::application::messaging::{CommandParser, DispatchOutcome, Dispatcher};
use crate::application::services::builtin_commands;
use crate::domain::entities::Message;
use crate::domain::traits::{Client, EventReceiver};
use crate::infrastructure::config::Config;
use crate::plugins::PluginManager;

pub struct Bot {
    dispatcher: Dispatcher,
    events: EventReceiver,
}

impl Bot {
    pub fn new(
        config: Config,
        client: Arc<dyn Client>,
        events: EventReceiver,
    ) -> Result<Self, BotError> {
        Self::with_plugins(config, client, events, PluginManager::new())
    }

    /// Built-in commands are registered first, then plugins run their hooks.
    pub fn with_plugins(
        config: Config,
        client: Arc<dyn Client>,
        events: EventReceiver,
        plugins: PluginManager,
    ) -> Result<Self, BotError> {
        config.validate()?;

        let commands = builtin_commands();
        let parser = CommandParser::new(config.bot.prefix.clone());
        let order = config.plugins.init_order;

        let mut context = BotContext::new(config, commands, client);
        plugins.initialize(&mut context, order)?;

        debug!(
            "Bot assembled: prefix {:?}, commands {:?}",
            parser.prefix(),
            context.commands.names()
        );

        Ok(Self {
            dispatcher: Dispatcher::new(parser, context),
            events,
        })
    }

    pub fn context(&self) -> &BotContext {
        self.dispatcher.context()
    }

    /// Mutable access before `run`, e.g. to register more commands
    pub fn context_mut(&mut self) -> &mut BotContext {
        self.dispatcher.context_mut()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.context().shutdown_handle().clone()
    }

    /// Dispatch one message directly, bypassing the event channel
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        self.dispatcher.dispatch(message).await
    }

    /// Log in with the configured token. Resolves with the client's identifying token.
    pub async fn connect(&self) -> Result<String, BotError> {
        let ctx = self.context();
        let token = ctx
            .config
            .token()
            .ok_or_else(|| ConfigError::MissingField("connection.token".to_string()))?;

        info!("Connecting {}", ctx.config.bot.name);
        let identity = ctx.client().login(token).await?;

        let me = ctx.client().bot_info();
        info!("Logged in as {} (@{})", me.name, me.username);
        Ok(identity)
    }

    /// Consume events until shutdown is triggered or the event source closes,
    /// then destroy the client.
    pub async fn run(mut self) -> Result<BotContext, BotError> {
        let mut shutdown = self.shutdown_handle().subscribe();

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                event = self.events.recv() => match event {
                    Some(event) => {
                        debug!("Event: {}", event.kind());
                        self.dispatcher.handle_event(event).await;
                    }
                    None => {
                        info!("Event source closed");
                        break;
                    }
                },
            }
        }

        info!("Shutting down");
        let context = self.dispatcher.into_context();
        context.client().destroy().await?;
        Ok(context)
    }
}
