use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::context::BotContext;
use crate::application::errors::CommandError;
use crate::domain::entities::Message;

/// A message that matched the command prefix and carried a command name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: String,
    pub args: Vec<String>,
}

impl ParsedCommand {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Arguments joined back with single spaces
    pub fn rest(&self) -> String {
        self.args.join(" ")
    }
}

/// Outcome of parsing one message. `None` means the message is not a command.
pub type ParseResult = Option<ParsedCommand>;

/// Callback run when its command name is matched.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(
        &self,
        parsed: &ParsedCommand,
        message: &Message,
        ctx: &BotContext,
    ) -> Result<(), CommandError>;

    /// One-line summary shown by `help`
    fn description(&self) -> Option<&str> {
        None
    }
}

type SyncHandlerFn =
    dyn Fn(&ParsedCommand, &Message, &BotContext) -> Result<(), CommandError> + Send + Sync;

/// Wraps a plain closure as a [`CommandHandler`]
pub struct FnHandler {
    func: Box<SyncHandlerFn>,
    description: Option<String>,
}

impl FnHandler {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&ParsedCommand, &Message, &BotContext) -> Result<(), CommandError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            func: Box::new(func),
            description: None,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

#[async_trait]
impl CommandHandler for FnHandler {
    async fn handle(
        &self,
        parsed: &ParsedCommand,
        message: &Message,
        ctx: &BotContext,
    ) -> Result<(), CommandError> {
        (self.func)(parsed, message, ctx)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Command name to ordered handler list.
///
/// Names are case-sensitive. Registering a name twice appends; lookup returns
/// handlers in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Vec<Arc<dyn CommandHandler>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.commands.entry(name.into()).or_default().push(handler);
    }

    /// Builder-style registration for assembling a registry in one expression
    pub fn on<H: CommandHandler + 'static>(mut self, name: impl Into<String>, handler: H) -> Self {
        self.register(name, Arc::new(handler));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&[Arc<dyn CommandHandler>]> {
        self.commands.get(name).map(Vec::as_slice)
    }

    /// Remove the handler at `index` under `name`. The key disappears with its last handler.
    pub fn remove(&mut self, name: &str, index: usize) -> Option<Arc<dyn CommandHandler>> {
        let handlers = self.commands.get_mut(name)?;
        if index >= handlers.len() {
            return None;
        }
        let removed = handlers.remove(index);
        if handlers.is_empty() {
            self.commands.remove(name);
        }
        Some(removed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// First available description for a command
    pub fn description(&self, name: &str) -> Option<&str> {
        self.lookup(name)?.iter().find_map(|h| h.description())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
