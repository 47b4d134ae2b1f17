//! Operator console - admin commands read from a line source (stdin in the binary)

use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::application::context::ShutdownHandle;
use crate::application::errors::BotError;
use super::ConsoleClient;

/// What the console does after running a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleAction {
    Continue,
    Exit,
}

type ConsoleFn = Box<dyn Fn(&[String]) -> ConsoleAction + Send + Sync>;

/// Admin command table
pub struct ConsoleCommands {
    commands: HashMap<String, ConsoleFn>,
}

impl ConsoleCommands {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// `exit` and `help`
    pub fn with_defaults() -> Self {
        Self::new()
            .on("exit", |_| ConsoleAction::Exit)
            .on("help", |_| {
                println!("Console commands: exit, help. Anything else is sent to the bot.");
                ConsoleAction::Continue
            })
    }

    pub fn on<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[String]) -> ConsoleAction + Send + Sync + 'static,
    {
        self.commands.insert(name.into(), Box::new(func));
        self
    }

    /// `None` when the first word is not a console command
    pub fn run(&self, line: &str) -> Option<ConsoleAction> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let func = self.commands.get(name)?;
        let args: Vec<String> = tokens.map(str::to_string).collect();
        Some(func(&args))
    }
}

impl Default for ConsoleCommands {
    fn default() -> Self {
        Self::with_defaults()
    }
}

pub struct ConsoleReader {
    commands: ConsoleCommands,
    shutdown: ShutdownHandle,
    forward: Option<Arc<ConsoleClient>>,
}

impl ConsoleReader {
    pub fn new(commands: ConsoleCommands, shutdown: ShutdownHandle) -> Self {
        Self {
            commands,
            shutdown,
            forward: None,
        }
    }

    /// Send non-command lines to the bot through `client`
    pub fn with_forward(mut self, client: Arc<ConsoleClient>) -> Self {
        self.forward = Some(client);
        self
    }

    /// Read lines until `exit`, end of input, or shutdown from elsewhere.
    ///
    /// `exit` triggers the shutdown handle; end of input does not.
    pub async fn run<R>(self, input: R) -> Result<(), BotError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut shutdown = self.shutdown.subscribe();

        loop {
            if self.shutdown.is_triggered() {
                break;
            }

            let line = tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                line = lines.next_line() => match line? {
                    Some(line) => line,
                    None => break,
                },
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.commands.run(line) {
                Some(ConsoleAction::Exit) => {
                    tracing::info!("Console: exit requested");
                    self.shutdown.trigger();
                    break;
                }
                Some(ConsoleAction::Continue) => {}
                None => match &self.forward {
                    Some(client) => client.inject(line).await?,
                    None => tracing::warn!("Unknown console command: {}", line),
                },
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::ClientEvent;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    #[test]
    fn test_commands_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let commands = ConsoleCommands::with_defaults().on("count", move |args| {
            seen.fetch_add(args.len(), Ordering::SeqCst);
            ConsoleAction::Continue
        });

        assert_eq!(commands.run("exit"), Some(ConsoleAction::Exit));
        assert_eq!(commands.run("count a  b"), Some(ConsoleAction::Continue));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(commands.run("!ping"), None);
        assert_eq!(commands.run("   "), None);
    }

    #[tokio::test]
    async fn test_exit_triggers_shutdown() {
        let shutdown = ShutdownHandle::new();
        let reader = ConsoleReader::new(ConsoleCommands::with_defaults(), shutdown.clone());

        reader.run(&b"help\nexit\nnever read\n"[..]).await.unwrap();

        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_stops_on_shutdown_while_waiting_for_input() {
        let shutdown = ShutdownHandle::new();
        let reader = ConsoleReader::new(ConsoleCommands::with_defaults(), shutdown.clone());

        // The writer half stays open, so the reader never sees end of input
        let (_writer, pipe) = tokio::io::duplex(64);
        let task = tokio::spawn(reader.run(tokio::io::BufReader::new(pipe)));

        tokio::task::yield_now().await;
        shutdown.trigger();

        let result = tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .expect("reader returns after shutdown");
        result.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_end_of_input_does_not_shut_down() {
        let shutdown = ShutdownHandle::new();
        let reader = ConsoleReader::new(ConsoleCommands::with_defaults(), shutdown.clone());

        reader.run(&b"help\n"[..]).await.unwrap();

        assert!(!shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_other_lines_are_forwarded() {
        let (tx, mut rx) = mpsc::channel(8);
        let client = Arc::new(ConsoleClient::new("ybot", tx));
        let shutdown = ShutdownHandle::new();
        let reader = ConsoleReader::new(ConsoleCommands::with_defaults(), shutdown)
            .with_forward(client);

        reader.run(&b"!ping\n\nhelp\n!draw cat\n"[..]).await.unwrap();

        let mut forwarded = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let ClientEvent::Message(msg) = event {
                forwarded.push(msg.content);
            }
        }
        assert_eq!(forwarded, vec!["!ping", "!draw cat"]);
    }
}
