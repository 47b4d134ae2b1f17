//! Console adapter for development/testing

mod reader;

pub use reader::{ConsoleAction, ConsoleCommands, ConsoleReader};

use async_trait::async_trait;
use crate::application::errors::BotError;
use crate::domain::entities::{Message, Presence, User};
use crate::domain::traits::{BotInfo, Client, ClientEvent, EventSender};

pub const CONSOLE_CHANNEL: &str = "console";

/// Console client - stands in for the remote platform.
///
/// Outgoing messages go to stdout; incoming messages are injected by the
/// operator console.
pub struct ConsoleClient {
    info: BotInfo,
    events: EventSender,
}

impl ConsoleClient {
    pub fn new(name: impl Into<String>, events: EventSender) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
            events,
        }
    }

    /// Deliver `text` to the bot as if an operator typed it in the chat channel
    pub async fn inject(&self, text: impl Into<String>) -> Result<(), BotError> {
        let message = Message::from_text(CONSOLE_CHANNEL, text)
            .with_author(User::new("operator").with_username("operator"))
            .with_platform("console");
        self.emit(ClientEvent::Message(message)).await
    }

    async fn emit(&self, event: ClientEvent) -> Result<(), BotError> {
        self.events
            .send(event)
            .await
            .map_err(|_| BotError::Connection("event receiver dropped".to_string()))
    }
}

#[async_trait]
impl Client for ConsoleClient {
    async fn login(&self, _token: &str) -> Result<String, BotError> {
        tracing::info!("Starting console client (dev mode)");
        self.emit(ClientEvent::Ready).await?;
        Ok(self.info.id.clone())
    }

    async fn send_message(&self, _channel_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn set_presence(&self, presence: &Presence) -> Result<(), BotError> {
        tracing::info!("Presence: {} / {}", presence.activity, presence.banner);
        Ok(())
    }

    async fn destroy(&self) -> Result<(), BotError> {
        tracing::info!("Console client closed");
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_login_emits_ready() {
        let (tx, mut rx) = mpsc::channel(4);
        let client = ConsoleClient::new("ybot", tx);

        assert_eq!(client.login("unused").await.unwrap(), "console");
        assert!(matches!(rx.recv().await, Some(ClientEvent::Ready)));
    }

    #[tokio::test]
    async fn test_inject_sends_message_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let client = ConsoleClient::new("ybot", tx);

        client.inject("!ping").await.unwrap();

        match rx.recv().await {
            Some(ClientEvent::Message(msg)) => {
                assert_eq!(msg.content(), "!ping");
                assert_eq!(msg.channel_id, CONSOLE_CHANNEL);
                assert_eq!(msg.author.map(|u| u.id), Some("operator".to_string()));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inject_after_receiver_dropped_fails() {
        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let client = ConsoleClient::new("ybot", tx);

        assert!(matches!(client.inject("!ping").await, Err(BotError::Connection(_))));
    }
}
