//! Incoming message type

use serde::{Deserialize, Serialize};

/// A text message received from the chat platform.
///
/// Immutable once constructed; the pipeline never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Chat the message arrived in (reply target)
    pub chat_id: i64,
    /// Platform identifier of the sender
    pub user_id: i64,
    /// Display name of the sender, used for logging only
    pub user_display_name: String,
    /// Raw message text; may be empty
    pub text: String,
}
