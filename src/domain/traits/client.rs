use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::errors::BotError;
use crate::domain::entities::{Message, Presence};

/// Events a platform client pushes to the dispatch core
#[derive(Debug)]
pub enum ClientEvent {
    /// Session established (first time or after a reconnect)
    Ready,
    Reconnecting,
    Disconnect,
    Error(BotError),
    Message(Message),
}

impl ClientEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientEvent::Ready => "ready",
            ClientEvent::Reconnecting => "reconnecting",
            ClientEvent::Disconnect => "disconnect",
            ClientEvent::Error(_) => "error",
            ClientEvent::Message(_) => "message",
        }
    }
}

pub type EventSender = mpsc::Sender<ClientEvent>;
pub type EventReceiver = mpsc::Receiver<ClientEvent>;

/// Client trait - abstraction over the remote messaging service.
///
/// Implementations own the connection and push [`ClientEvent`]s into the
/// [`EventSender`] they were built with.
#[async_trait]
pub trait Client: Send + Sync {
    /// Log in and start the session; resolves with an identifying token
    async fn login(&self, token: &str) -> Result<String, BotError>;

    /// Send a text message to a channel, returning the platform message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Apply activity and banner
    async fn set_presence(&self, _presence: &Presence) -> Result<(), BotError> {
        Ok(())
    }

    /// Close the connection
    async fn destroy(&self) -> Result<(), BotError>;

    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
