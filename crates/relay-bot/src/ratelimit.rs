//! Per-user rate limiting

use chrono::{DateTime, Duration, Utc};

use crate::session::SessionStore;

/// Minimum-interval limiter over the session store.
///
/// Granularity is per-user-global: a user talking to the bot from two
/// chats shares one window.
#[derive(Clone)]
pub struct RateLimiter {
    store: SessionStore,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(store: SessionStore, min_interval: Duration) -> Self {
        Self { store, min_interval }
    }

    /// Check whether a message arriving at `now` may proceed.
    ///
    /// Accepting records `now` as the user's last message time;
    /// rejecting leaves the stored timestamp untouched, so a burst of
    /// rejected messages cannot extend the window. The first-ever
    /// message from a user always passes.
    pub async fn allow(&self, user_id: i64, now: DateTime<Utc>) -> bool {
        let min_interval = self.min_interval;
        self.store
            .upsert(user_id, move |session| match session.last_message_time {
                Some(last) if now - last < min_interval => false,
                _ => {
                    session.last_message_time = Some(now);
                    true
                }
            })
            .await
    }
}
