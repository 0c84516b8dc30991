//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a process-local map. Each entry remembers when it was
//! last written; entries older than the TTL read as absent and are dropped
//! by [`purge_expired`](SessionStore::purge_expired).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct StoredSession {
    session: IntakeSession,
    stored_at: Timestamp,
}

/// In-memory storage for intake sessions
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<UserId, StoredSession>>>,
    ttl_secs: u64,
}

impl InMemorySessionStore {
    /// Default time a session lives after its last write.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Create a new in-memory store with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    /// Create a new in-memory store whose sessions expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs: ttl.as_secs(),
        }
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    #[cfg(test)]
    async fn put_stored_at(&self, user_id: &UserId, session: &IntakeSession, stored_at: Timestamp) {
        self.sessions.write().await.insert(
            user_id.clone(),
            StoredSession {
                session: session.clone(),
                stored_at,
            },
        );
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let now = Timestamp::now();
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(user_id)
            .filter(|stored| !stored.stored_at.has_expired(self.ttl_secs, &now))
            .map(|stored| stored.session.clone()))
    }

    async fn put(&self, user_id: &UserId, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            user_id.clone(),
            StoredSession {
                session: session.clone(),
                stored_at: Timestamp::now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, user_id: &UserId) -> Result<bool, SessionStoreError> {
        Ok(self.sessions.write().await.remove(user_id).is_some())
    }

    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !stored.stored_at.has_expired(self.ttl_secs, &now));
        Ok((before - sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{Category, ExtractedField, Step};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn session_at(step: Step) -> IntakeSession {
        let mut session = IntakeSession::new(Step::CategorySelection);
        session.record(ExtractedField::Category(Category::AirTravel));
        session.advance_to(step);
        session
    }

    #[tokio::test]
    async fn put_then_get_returns_session() {
        let store = InMemorySessionStore::new();
        let session = session_at(Step::Name);

        store.put(&user("u1"), &session).await.unwrap();

        let loaded = store.get(&user("u1")).await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn get_unknown_user_returns_none() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(&user("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_existing_session() {
        let store = InMemorySessionStore::new();
        store.put(&user("u1"), &session_at(Step::Name)).await.unwrap();
        store.put(&user("u1"), &session_at(Step::Email)).await.unwrap();

        let loaded = store.get(&user("u1")).await.unwrap().unwrap();
        assert_eq!(loaded.current_step(), Step::Email);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_user() {
        let store = InMemorySessionStore::new();
        store.put(&user("a"), &session_at(Step::Name)).await.unwrap();
        store.put(&user("b"), &session_at(Step::Dates)).await.unwrap();

        assert_eq!(
            store.get(&user("a")).await.unwrap().unwrap().current_step(),
            Step::Name
        );
        assert_eq!(
            store.get(&user("b")).await.unwrap().unwrap().current_step(),
            Step::Dates
        );
    }

    #[tokio::test]
    async fn remove_reports_whether_session_existed() {
        let store = InMemorySessionStore::new();
        store.put(&user("u1"), &session_at(Step::Name)).await.unwrap();

        assert!(store.remove(&user("u1")).await.unwrap());
        assert!(!store.remove(&user("u1")).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn expired_session_reads_as_absent() {
        let store = InMemorySessionStore::with_ttl(Duration::from_secs(60));
        let stale = Timestamp::now().minus_secs(120);
        store.put_stored_at(&user("old"), &session_at(Step::Name), stale).await;

        assert_eq!(store.get(&user("old")).await.unwrap(), None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn purge_drops_only_expired_sessions() {
        let store = InMemorySessionStore::with_ttl(Duration::from_secs(60));
        let stale = Timestamp::now().minus_secs(120);
        store.put_stored_at(&user("old"), &session_at(Step::Name), stale).await;
        store.put(&user("fresh"), &session_at(Step::Email)).await.unwrap();

        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get(&user("fresh")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn ttl_beyond_calendar_range_keeps_sessions() {
        let store = InMemorySessionStore::with_ttl(Duration::from_secs(10_000_000_000_000));
        store.put(&user("u1"), &session_at(Step::Name)).await.unwrap();

        assert!(store.get(&user("u1")).await.unwrap().is_some());
        assert_eq!(store.purge_expired().await.unwrap(), 0);
        assert_eq!(store.len().await, 1);
    }
}
