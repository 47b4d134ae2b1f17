//! Message dispatcher - Routes platform events to lifecycle transitions and command handlers

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tracing::{debug, error, warn};

use crate::application::context::BotContext;
use crate::domain::entities::{Message, Transition};
use crate::domain::traits::ClientEvent;
use super::parser::CommandParser;

/// What happened to one incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No prefix or no command name
    NotCommand,
    /// Parsed, but nothing is registered under the name
    Unknown(String),
    Dispatched {
        command: String,
        invoked: usize,
        failed: usize,
    },
    /// Shutdown was triggered; the message was dropped
    ShuttingDown,
}

/// Dispatch core. Owns the context and is the only writer of its lifecycle state.
pub struct Dispatcher {
    parser: CommandParser,
    context: BotContext,
}

impl Dispatcher {
    pub fn new(parser: CommandParser, context: BotContext) -> Self {
        Self { parser, context }
    }

    pub fn context(&self) -> &BotContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BotContext {
        &mut self.context
    }

    pub fn into_context(self) -> BotContext {
        self.context
    }

    /// Handle a single event from the platform client
    pub async fn handle_event(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::Message(message) => {
                self.dispatch(&message).await;
            }
            ClientEvent::Ready => {
                self.on_ready().await;
            }
            ClientEvent::Disconnect => {
                self.on_disconnect();
            }
            ClientEvent::Reconnecting => {
                debug!("Reconnecting... (state: {})", self.context.lifecycle.connectivity());
            }
            ClientEvent::Error(e) => {
                error!("Client error: {}", e);
            }
        }
    }

    /// Apply a `ready` event: go online and re-apply presence
    pub async fn on_ready(&mut self) -> Transition {
        let presence = self.context.config.presence.to_presence();
        let transition = self.context.lifecycle.on_ready(presence.clone());

        match transition {
            Transition::Reconnected => debug!("Reconnected!"),
            _ => debug!("Online!"),
        }

        if let Err(e) = self.context.client().set_presence(&presence).await {
            warn!("Failed to set presence: {}", e);
        }

        transition
    }

    pub fn on_disconnect(&mut self) -> Transition {
        let transition = self.context.lifecycle.on_disconnect();
        match transition {
            Transition::Disconnected => debug!("Disconnected!"),
            _ => debug!("Disconnect while already offline"),
        }
        transition
    }

    /// Parse `message` and run every handler registered for its command, in order.
    ///
    /// A handler that errors or panics is logged and does not stop the ones after it.
    pub async fn dispatch(&self, message: &Message) -> DispatchOutcome {
        if self.context.shutdown_handle().is_triggered() {
            return DispatchOutcome::ShuttingDown;
        }

        let Some(parsed) = self.parser.parse(message.content()) else {
            return DispatchOutcome::NotCommand;
        };

        let Some(handlers) = self.context.commands.lookup(&parsed.command) else {
            return DispatchOutcome::Unknown(parsed.command);
        };

        debug!("Bot command: {}", message.content());

        let mut failed = 0;
        for (index, handler) in handlers.iter().enumerate() {
            let call = AssertUnwindSafe(handler.handle(&parsed, message, &self.context));
            match call.catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failed += 1;
                    warn!(
                        command = %parsed.command,
                        handler = index,
                        "Command handler failed: {}",
                        e
                    );
                }
                Err(payload) => {
                    failed += 1;
                    warn!(
                        command = %parsed.command,
                        handler = index,
                        "Command handler panicked: {}",
                        panic_message(payload.as_ref())
                    );
                }
            }
        }

        DispatchOutcome::Dispatched {
            invoked: handlers.len(),
            failed,
            command: parsed.command,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
