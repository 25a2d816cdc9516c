//! Pipeline outcome types

use serde::{Deserialize, Serialize};

/// Why a message was rejected before reaching the completion service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The sender is inside the minimum-interval window
    RateLimited,
    /// Trimmed text was empty
    Empty,
    /// Trimmed text was below the minimum length
    TooShort,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::RateLimited => write!(f, "rate_limited"),
            RejectReason::Empty => write!(f, "empty"),
            RejectReason::TooShort => write!(f, "too_short"),
        }
    }
}

/// Result of a validation check on incoming text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Nothing left after trimming
    Empty,
    /// A single character after trimming
    TooShort,
    /// Long enough to process
    Ok,
}

/// Terminal outcome of running one message through the pipeline.
///
/// Describes what was sent back toward the user. Exactly one of these
/// is produced per incoming message; no error escapes the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    /// Short-circuited before the completion call; user got a notice
    Rejected(RejectReason),
    /// AI reply was produced and handed to the transport
    Delivered(String),
    /// Completion failed; user got a generic apology. The payload is
    /// the internal diagnostic detail and must never reach the chat.
    Failed(String),
}
