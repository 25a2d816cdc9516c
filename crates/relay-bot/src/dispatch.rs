//! Response dispatcher
//!
//! Sends interim notices, the final formatted reply, and user-safe
//! error messages through the chat transport. Every send here is
//! fire-and-forget: failures are logged, never retried, and never
//! propagated.

use relay_types::{ChatTransport, SendOutcome};
use std::sync::Arc;
use tracing::{error, warn};

/// Dispatches outbound text through the chat transport.
///
/// Final AI replies go out with the platform's lightweight markup;
/// interim/status/error notices go out as plain text so arbitrary
/// error strings cannot trip the markup parser.
#[derive(Clone)]
pub struct ResponseDispatcher {
    transport: Arc<dyn ChatTransport>,
}

impl ResponseDispatcher {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Send the final AI-generated reply with markup rendering
    pub async fn deliver_reply(&self, chat_id: i64, text: &str) -> SendOutcome {
        let outcome = self.transport.send_text(chat_id, text, true).await;
        if let SendOutcome::Failed(reason) = &outcome {
            error!(chat_id, %reason, "Failed to deliver reply");
        }
        outcome
    }

    /// Send a plain-text notice (status, rejection, apology)
    pub async fn send_notice(&self, chat_id: i64, text: &str) -> SendOutcome {
        let outcome = self.transport.send_text(chat_id, text, false).await;
        if let SendOutcome::Failed(reason) = &outcome {
            warn!(chat_id, %reason, "Failed to send notice");
        }
        outcome
    }

    /// Signal typing presence
    pub async fn signal_typing(&self, chat_id: i64) -> SendOutcome {
        let outcome = self.transport.send_typing(chat_id).await;
        if let SendOutcome::Failed(reason) = &outcome {
            warn!(chat_id, %reason, "Failed to send typing action");
        }
        outcome
    }
}
