//! Session store abstraction and its in-memory implementation.
//!
//! Sessions are ephemeral per-browser records; meui holds no durable
//! state, so the production store is an in-process map. Within a single
//! user's session, concurrent requests can race on read-modify-write; the
//! store makes no attempt to serialize them and last write wins.

use async_trait::async_trait;
use meui_platform_access::{Session, SessionId};
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// Errors from session store operations.
#[derive(Debug, Clone)]
pub struct StoreError {
    reason: String,
}

impl StoreError {
    /// Creates a store error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session store error: {}", self.reason)
    }
}

impl std::error::Error for StoreError {}

/// Persistence for session records, keyed by the opaque cookie value.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Finds a session by ID.
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, StoreError>;

    /// Saves a session, replacing any previous record under the same ID.
    async fn save(&self, session: Session) -> Result<(), StoreError>;

    /// Deletes a session by ID. Deleting an absent session is not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Deletes expired sessions, returning how many were removed.
    async fn delete_expired(&self) -> Result<u64, StoreError>;
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn save(&self, session: Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session);
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}

/// Generates a unique session ID using ULID.
#[must_use]
pub fn generate_session_id() -> SessionId {
    SessionId::new(ulid::Ulid::new().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use meui_platform_access::TokenPair;

    fn session_with_token(id: &str, access_token: &str, ttl: Duration) -> Session {
        let mut session = Session::new(SessionId::new(id.to_string()), ttl);
        session.set_tokens(TokenPair::bearer(access_token.to_string()));
        session
    }

    #[tokio::test]
    async fn save_and_find_roundtrip() {
        let store = MemorySessionStore::new();
        let session = session_with_token("sess_1", "token_a", Duration::hours(24));
        store.save(session.clone()).await.expect("save");

        let found = store
            .find(session.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn find_unknown_returns_none() {
        let store = MemorySessionStore::new();
        let found = store
            .find(&SessionId::new("sess_missing".to_string()))
            .await
            .expect("find");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = MemorySessionStore::new();
        let session = session_with_token("sess_1", "token_a", Duration::hours(24));
        let id = session.id().clone();
        store.save(session).await.expect("save");
        store.delete(&id).await.expect("delete");
        assert!(store.find(&id).await.expect("find").is_none());

        // Deleting again is a no-op.
        store.delete(&id).await.expect("second delete");
    }

    #[tokio::test]
    async fn delete_expired_sweeps_only_expired() {
        let store = MemorySessionStore::new();
        store
            .save(session_with_token("sess_live", "a", Duration::hours(1)))
            .await
            .expect("save live");
        store
            .save(session_with_token("sess_dead", "b", Duration::seconds(-1)))
            .await
            .expect("save dead");

        let removed = store.delete_expired().await.expect("sweep");
        assert_eq!(removed, 1);
        assert!(
            store
                .find(&SessionId::new("sess_live".to_string()))
                .await
                .expect("find")
                .is_some()
        );
        assert!(
            store
                .find(&SessionId::new("sess_dead".to_string()))
                .await
                .expect("find")
                .is_none()
        );
    }

    /// Two tabs refreshing the same session concurrently is a known race:
    /// the store offers no locking and the last write wins.
    #[tokio::test]
    async fn concurrent_saves_are_last_write_wins() {
        let store = MemorySessionStore::new();
        let first = session_with_token("sess_1", "token_from_tab_a", Duration::hours(24));
        let second = session_with_token("sess_1", "token_from_tab_b", Duration::hours(24));

        store.save(first).await.expect("save first");
        store.save(second.clone()).await.expect("save second");

        let found = store
            .find(second.id())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(
            found.tokens().map(|t| t.access_token()),
            Some("token_from_tab_b")
        );
    }

    #[test]
    fn generated_session_ids_are_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert_ne!(a, b);
    }
}
