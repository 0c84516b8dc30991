//! Redis-backed session store for multi-server deployments.
//!
//! Each session is one JSON string under `travel_desk:session:{user_id}`,
//! written with `SET .. EX ttl` so Redis expires idle sessions itself.
//! Values that no longer decode read as absent and are overwritten by the
//! next write.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::UserId;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

const KEY_PREFIX: &str = "travel_desk:session:";

/// Redis implementation of SessionStore.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStore {
    /// Create a new Redis session store. `ttl_secs` must be at least 1.
    pub fn new(conn: MultiplexedConnection, ttl_secs: u64) -> Self {
        Self {
            conn,
            ttl_secs: ttl_secs.max(1),
        }
    }

    /// Connect to `url` and build a store on a multiplexed connection.
    pub async fn connect(url: &str, ttl_secs: u64) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(unavailable)?;
        Ok(Self::new(conn, ttl_secs))
    }
}

fn session_key(user_id: &UserId) -> String {
    format!("{}{}", KEY_PREFIX, user_id)
}

fn decode_session(json: &str) -> Result<IntakeSession, SessionStoreError> {
    serde_json::from_str(json).map_err(|e| SessionStoreError::DeserializationFailed(e.to_string()))
}

fn unavailable(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Unavailable(e.to_string())
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn.get(session_key(user_id)).await.map_err(unavailable)?;

        match raw.as_deref().map(decode_session).transpose() {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "discarding undecodable intake session");
                Ok(None)
            }
        }
    }

    async fn put(&self, user_id: &UserId, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(session_key(user_id))
            .arg(json)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(unavailable)?;

        Ok(())
    }

    async fn remove(&self, user_id: &UserId) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();

        let removed: i64 = conn.del(session_key(user_id)).await.map_err(unavailable)?;

        Ok(removed > 0)
    }
}

impl std::fmt::Debug for RedisSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
