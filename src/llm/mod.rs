//! Completion collaborator: message types, fixed generation parameters and
//! the provider seam the request handler talks through.

pub mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Generation configuration: constants, never user-controlled
// ============================================================================

pub const TEMPERATURE: f32 = 1.0;
pub const MAX_TOKENS: u32 = 1024;
pub const TOP_P: f32 = 1.0;
pub const FREQUENCY_PENALTY: f32 = 0.0;
pub const PRESENCE_PENALTY: f32 = 0.0;

// ============================================================================
// Prompt message types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

// ============================================================================
// Provider seam
// ============================================================================

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },

    #[error("completion stream failed: {0}")]
    Stream(String),

    #[error("completion response contained no text")]
    Empty,
}

/// Seam between the request handler and the hosted model. The production
/// implementation is [`GroqClient`]; tests substitute a canned stub.
///
/// One attempt per call. Failures surface immediately; there is no retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// Strips the markdown bold markers the model likes to emit and trims
/// surrounding whitespace before the reply enters history.
pub fn normalize_reply(raw: &str) -> String {
    raw.replace("**", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_roles_serialize_lowercase() {
        let message = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn normalize_strips_bold_markers_and_whitespace() {
        assert_eq!(
            normalize_reply("  **Stay hydrated** and rest.\n"),
            "Stay hydrated and rest."
        );
        assert_eq!(normalize_reply("plain"), "plain");
    }
}
