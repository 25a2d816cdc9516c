//! Input validation
//!
//! Rejects empty or too-short input before any expensive work.

use relay_types::ValidationOutcome;

/// Minimum characters after trimming
const MIN_MESSAGE_CHARS: usize = 2;

/// Classify incoming text.
///
/// Only leading/trailing whitespace is stripped for the length check;
/// the original text (internal whitespace included) is what flows to
/// the prompt builder.
pub fn validate(text: &str) -> ValidationOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        ValidationOutcome::Empty
    } else if trimmed.chars().count() < MIN_MESSAGE_CHARS {
        ValidationOutcome::TooShort
    } else {
        ValidationOutcome::Ok
    }
}
