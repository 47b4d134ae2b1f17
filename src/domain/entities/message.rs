use super::User;
use chrono::{DateTime, Utc};

/// An incoming or outgoing chat message.
///
/// Platform adapters fill in whatever they know; the dispatch core only reads `content`.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author: Option<User>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(channel_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id: channel_id.into(),
            author: None,
            content: content.into(),
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(channel_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(channel_id, text)
    }

    pub fn with_author(mut self, user: User) -> Self {
        self.author = Some(user);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}
