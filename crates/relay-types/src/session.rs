//! Per-user session state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ephemeral per-user state, created lazily on a user's first message.
///
/// Lives for the process lifetime; there is no persistence and no
/// automatic eviction (the store offers an opt-in idle sweep).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSession {
    /// Timestamp of the last message that passed the rate-limit check.
    /// `None` until the first accepted message.
    pub last_message_time: Option<DateTime<Utc>>,
    /// Optional persona label applied to every prompt until changed.
    pub role: Option<String>,
}

impl UserSession {
    /// Session for a user we have never seen before
    pub fn new() -> Self {
        Self::default()
    }
}
