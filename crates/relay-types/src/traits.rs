//! Collaborator traits
//!
//! The pipeline talks to the chat platform and the completion service
//! through these traits so scenario tests can substitute in-process
//! fakes for both.

use async_trait::async_trait;

/// Outcome of a single outbound send.
///
/// Best-effort sends (interim notices, typing indicator) report their
/// failure through this type instead of an error so the caller can log
/// it without aborting the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    /// Transport rejected the send; carries the transport's error text
    Failed(String),
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent)
    }
}

/// Text generation service (DeepSeek in production).
///
/// Timeouts, authentication and retries live behind this trait; the
/// pipeline makes exactly one call per message and never retries.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the generated reply text.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a message, optionally rendered with the platform's
    /// lightweight markup. Plain text when `markup` is false.
    async fn send_text(&self, chat_id: i64, text: &str, markup: bool) -> SendOutcome;

    /// Signal "typing" presence in the chat.
    async fn send_typing(&self, chat_id: i64) -> SendOutcome;
}
