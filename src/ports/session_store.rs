//! Session Store Port - Interface for persisting intake sessions.
//!
//! The intake engine is stateless; everything that must survive between
//! messages lives behind this port, keyed by user id. Implementations are
//! expected to expire sessions that have not been written for their TTL.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::intake::IntakeSession;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),
}

/// Port for loading and saving per-user intake sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for `user_id`.
    ///
    /// Returns `Ok(None)` when no live session exists, including when the
    /// stored session has expired.
    async fn get(&self, user_id: &UserId) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Save (insert or replace) the session for `user_id` and restart its TTL.
    async fn put(&self, user_id: &UserId, session: &IntakeSession) -> Result<(), SessionStoreError>;

    /// Delete the session for `user_id`.
    ///
    /// # Returns
    /// `true` if a session was removed
    async fn remove(&self, user_id: &UserId) -> Result<bool, SessionStoreError>;

    /// Drop expired sessions. Returns how many were dropped.
    ///
    /// Stores whose backend expires entries on its own keep the default.
    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        Ok(0)
    }
}
