// src/ai/mod.rs

pub mod groq;
pub mod hf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::Mutex;

pub use groq::GroqClient;
pub use hf::HfSpaceClient;

/// One turn of a chat conversation, in the wire format the chat
/// completion API expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Failure of an upstream AI call.
#[derive(Debug)]
pub enum GeneratorError {
    /// The HTTP request itself failed (connect, timeout, decode).
    Http(reqwest::Error),
    /// The upstream answered with a non-success status.
    Status { status: u16, body: String },
    /// The upstream answered 200 but the payload is not usable.
    Malformed(String),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Http(err) => write!(f, "upstream request failed: {}", err),
            GeneratorError::Status { status, body } => {
                write!(f, "upstream returned {}: {}", status, body)
            }
            GeneratorError::Malformed(msg) => write!(f, "upstream reply malformed: {}", msg),
        }
    }
}

impl std::error::Error for GeneratorError {}

impl From<reqwest::Error> for GeneratorError {
    fn from(err: reqwest::Error) -> Self {
        GeneratorError::Http(err)
    }
}

/// Text-generation collaborator. Opaque: may fail or time out, and the
/// reply is freeform text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError>;
}

/// Speech-to-text collaborator.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Vec<u8>, language: &str) -> Result<String, GeneratorError>;
}

/// Image classification collaborator.
#[async_trait]
pub trait ImageLabeler: Send + Sync {
    async fn label(&self, image_base64: &str) -> Result<String, GeneratorError>;
}

/// In-memory chat history per user id, seeded with a system message on
/// first use. Not persisted; lost on restart.
#[derive(Default)]
pub struct Conversations {
    inner: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl Conversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user message to the conversation for `user_id`, creating it
    /// with a system message first if needed, and returns a snapshot of the
    /// full history to send upstream.
    pub async fn push_user(
        &self,
        user_id: &str,
        language: &str,
        age_level: &str,
        message: &str,
    ) -> Vec<ChatMessage> {
        let mut conversations = self.inner.lock().await;
        let history = conversations.entry(user_id.to_string()).or_insert_with(|| {
            vec![ChatMessage::system(format!(
                "Respond in {}, for age level {}.",
                language, age_level
            ))]
        });
        history.push(ChatMessage::user(message));
        history.clone()
    }

    /// Records the assistant's reply so later turns see it as context.
    pub async fn push_assistant(&self, user_id: &str, reply: &str) {
        let mut conversations = self.inner.lock().await;
        if let Some(history) = conversations.get_mut(user_id) {
            history.push(ChatMessage::assistant(reply));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn conversation_is_seeded_with_one_system_message() {
        let conversations = Conversations::new();

        let first = conversations.push_user("u1", "en", "12", "hello").await;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].role, "system");
        assert_eq!(first[0].content, "Respond in en, for age level 12.");
        assert_eq!(first[1].role, "user");

        conversations.push_assistant("u1", "hi there").await;

        // A second turn reuses the existing history, no new system message.
        let second = conversations.push_user("u1", "fr", "adult", "again").await;
        assert_eq!(second.len(), 4);
        assert_eq!(second[0].content, "Respond in en, for age level 12.");
        assert_eq!(second[2].role, "assistant");
    }

    #[tokio::test]
    async fn push_assistant_without_history_is_a_noop() {
        let conversations = Conversations::new();
        conversations.push_assistant("ghost", "reply").await;
        let history = conversations.push_user("ghost", "en", "12", "hi").await;
        assert_eq!(history.len(), 2);
    }
}
