//! Message pipeline
//!
//! Orchestrates one incoming text message: rate limit, validation,
//! language detection, prompt construction, the completion call, and
//! response delivery. Exactly one `PipelineResult` comes out per
//! message; no error escapes `process`.

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;

use chrono::{DateTime, Duration, Utc};
use relay_types::{
    CompletionClient, IncomingMessage, PipelineResult, RejectReason, ValidationOutcome,
};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::dispatch::ResponseDispatcher;
use crate::language;
use crate::prompt;
use crate::ratelimit::RateLimiter;
use crate::session::SessionStore;
use crate::validate;

/// Notice for messages inside the rate-limit window
pub const RATE_LIMIT_NOTICE: &str =
    "You're sending messages too quickly. Please wait a moment and try again.";

/// Notice for messages with no text content
pub const EMPTY_NOTICE: &str = "Your message is empty. Please send me some text to work with.";

/// Notice for messages below the minimum length
pub const TOO_SHORT_NOTICE: &str =
    "That message is a bit too short. Please send at least two characters.";

/// Interim notice sent before the completion call
pub const PROCESSING_NOTICE: &str = "Processing your message...";

/// Generic apology for completion failures; raw error text never
/// reaches the chat
pub const FAILURE_NOTICE: &str =
    "Sorry, I encountered an error while processing your message. Please try again later.";

/// Per-message orchestrator
#[derive(Clone)]
pub struct MessagePipeline {
    limiter: RateLimiter,
    dispatcher: ResponseDispatcher,
    completion: Arc<dyn CompletionClient>,
    store: SessionStore,
    preview_chars: usize,
}

impl MessagePipeline {
    pub fn new(
        store: SessionStore,
        dispatcher: ResponseDispatcher,
        completion: Arc<dyn CompletionClient>,
        min_interval: Duration,
        preview_chars: usize,
    ) -> Self {
        Self {
            limiter: RateLimiter::new(store.clone(), min_interval),
            dispatcher,
            completion,
            store,
            preview_chars,
        }
    }

    /// Process one message arriving now
    pub async fn process(&self, msg: &IncomingMessage) -> PipelineResult {
        self.process_at(msg, Utc::now()).await
    }

    /// Process one message with an explicit arrival time
    pub async fn process_at(&self, msg: &IncomingMessage, now: DateTime<Utc>) -> PipelineResult {
        // 1. Rate check. Accepting stamps the session; rejecting
        //    leaves it untouched.
        if !self.limiter.allow(msg.user_id, now).await {
            debug!(user = %msg.user_display_name, "Rate limited");
            self.dispatcher.send_notice(msg.chat_id, RATE_LIMIT_NOTICE).await;
            return PipelineResult::Rejected(RejectReason::RateLimited);
        }

        // 2. Validate before any expensive work.
        match validate::validate(&msg.text) {
            ValidationOutcome::Empty => {
                self.dispatcher.send_notice(msg.chat_id, EMPTY_NOTICE).await;
                return PipelineResult::Rejected(RejectReason::Empty);
            }
            ValidationOutcome::TooShort => {
                self.dispatcher.send_notice(msg.chat_id, TOO_SHORT_NOTICE).await;
                return PipelineResult::Rejected(RejectReason::TooShort);
            }
            ValidationOutcome::Ok => {}
        }

        // 3. Language detection, logging only. Cannot fail.
        let lang = language::detect(&msg.text);
        info!(
            user = %msg.user_display_name,
            language = lang,
            "Processing message"
        );

        // 4. Compose the prompt with the current session role.
        let role = self
            .store
            .get(msg.user_id)
            .await
            .and_then(|session| session.role);
        let prompt = prompt::build(&msg.text, role.as_deref());

        // 5/6. Best-effort feedback; failures are logged by the
        //      dispatcher and do not abort the pipeline.
        self.dispatcher.send_notice(msg.chat_id, PROCESSING_NOTICE).await;
        self.dispatcher.signal_typing(msg.chat_id).await;

        // 7. One-shot completion call.
        match self.completion.complete(&prompt).await {
            Ok(reply) => {
                info!(
                    user = %msg.user_display_name,
                    preview = %truncate(&reply, self.preview_chars),
                    "Delivering AI reply"
                );
                self.dispatcher.deliver_reply(msg.chat_id, &reply).await;
                PipelineResult::Delivered(reply)
            }
            Err(e) => {
                // Full diagnostic stays in the logs; the user sees one
                // generic apology.
                error!(
                    user = %msg.user_display_name,
                    error = ?e,
                    "Completion failed"
                );
                self.dispatcher.send_notice(msg.chat_id, FAILURE_NOTICE).await;
                PipelineResult::Failed(format!("{e:#}"))
            }
        }
    }
}

/// Char-safe truncation for log previews
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod truncate_tests {
    use super::truncate;

    #[test]
    fn test_short_string_unchanged() {
        assert_eq!(truncate("hello", 100), "hello");
    }

    #[test]
    fn test_long_string_truncated_with_ellipsis() {
        let s = "x".repeat(150);
        let t = truncate(&s, 100);
        assert_eq!(t.chars().count(), 103);
        assert!(t.ends_with("..."));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let s = "ё".repeat(10);
        assert_eq!(truncate(&s, 4), format!("{}...", "ё".repeat(4)));
    }
}
