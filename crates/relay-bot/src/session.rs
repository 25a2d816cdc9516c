//! Session store
//!
//! Explicitly owned, injected store for per-user session state. A
//! single lock serializes read-modify-write of an entry; entries are
//! independent per user and never shared across processes.

use chrono::{DateTime, Duration, Utc};
use relay_types::UserSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-process session store keyed by user ID
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, UserSession>>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of a user's session, if one exists
    pub async fn get(&self, user_id: i64) -> Option<UserSession> {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).cloned()
    }

    /// Run a mutator against a user's session under the write lock,
    /// creating the session lazily on first use. The mutator's return
    /// value is passed through, so callers can both decide and record
    /// in one atomic step.
    pub async fn upsert<R>(
        &self,
        user_id: i64,
        mutator: impl FnOnce(&mut UserSession) -> R,
    ) -> R {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id).or_default();
        mutator(session)
    }

    /// Set or clear a user's persona label
    pub async fn set_role(&self, user_id: i64, role: Option<String>) {
        self.upsert(user_id, |session| session.role = role).await;
    }

    /// Number of users with live sessions
    pub async fn active_sessions(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Drop sessions idle for longer than `max_idle`. Returns the
    /// number of evicted sessions. Not called on a timer by default;
    /// unbounded growth is the documented baseline behavior.
    pub async fn evict_idle(&self, max_idle: Duration, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| match session.last_message_time {
            Some(last) => now - last <= max_idle,
            None => true,
        });
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = SessionStore::new();
        assert_eq!(store.active_sessions().await, 0);
        assert!(store.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_upsert_creates_session_lazily() {
        let store = SessionStore::new();
        store.upsert(42, |s| s.last_message_time = Some(at(100))).await;
        assert_eq!(store.active_sessions().await, 1);
        let session = store.get(42).await.expect("session");
        assert_eq!(session.last_message_time, Some(at(100)));
    }

    #[tokio::test]
    async fn test_upsert_passes_through_return_value() {
        let store = SessionStore::new();
        let had_role = store.upsert(1, |s| s.role.is_some()).await;
        assert!(!had_role);
    }

    #[tokio::test]
    async fn test_set_role_and_clear() {
        let store = SessionStore::new();
        store.set_role(7, Some("tutor".to_string())).await;
        assert_eq!(store.get(7).await.unwrap().role.as_deref(), Some("tutor"));

        store.set_role(7, None).await;
        assert!(store.get(7).await.unwrap().role.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated_per_user() {
        let store = SessionStore::new();
        store.set_role(1, Some("pirate".to_string())).await;
        store.upsert(2, |s| s.last_message_time = Some(at(5))).await;

        assert_eq!(store.get(1).await.unwrap().role.as_deref(), Some("pirate"));
        assert!(store.get(2).await.unwrap().role.is_none());
        assert!(store.get(1).await.unwrap().last_message_time.is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_drops_stale_sessions() {
        let store = SessionStore::new();
        store.upsert(1, |s| s.last_message_time = Some(at(0))).await;
        store.upsert(2, |s| s.last_message_time = Some(at(900))).await;

        let evicted = store.evict_idle(Duration::seconds(600), at(1000)).await;
        assert_eq!(evicted, 1);
        assert!(store.get(1).await.is_none());
        assert!(store.get(2).await.is_some());
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_sessions_without_timestamp() {
        let store = SessionStore::new();
        store.set_role(1, Some("tutor".to_string())).await;

        let evicted = store.evict_idle(Duration::seconds(1), at(1000)).await;
        assert_eq!(evicted, 0);
        assert!(store.get(1).await.is_some());
    }
}
