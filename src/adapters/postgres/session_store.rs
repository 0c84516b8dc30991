//! PostgreSQL implementation of SessionStore.
//!
//! Sessions live in the `intake_sessions` table, one row per user. Every
//! write stamps `stored_at`; rows whose `stored_at` is older than the TTL
//! read as absent and are deleted by `purge_expired`. Rows that no longer
//! decode (unknown step, garbled data) also read as absent, so the next
//! message starts over at the entry step and overwrites them.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::intake::{CollectedData, IntakeSession, Step};
use crate::ports::{SessionStore, SessionStoreError};

/// Upper bound for the TTL handed to `INTERVAL` arithmetic.
const MAX_TTL_SECS: i64 = i32::MAX as i64;

/// PostgreSQL implementation of SessionStore.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
    ttl_secs: i64,
}

impl PostgresSessionStore {
    /// Creates a new PostgresSessionStore.
    pub fn new(pool: PgPool, ttl_secs: u64) -> Self {
        Self {
            pool,
            ttl_secs: i64::try_from(ttl_secs).map_or(MAX_TTL_SECS, |s| s.min(MAX_TTL_SECS)),
        }
    }

    /// Applies the bundled migrations.
    pub async fn migrate(&self) -> Result<(), SessionStoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| SessionStoreError::Unavailable(format!("Migration failed: {}", e)))
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<IntakeSession>, SessionStoreError> {
        let row = sqlx::query(
            r#"
            SELECT current_step, collected_data, created_at, updated_at
            FROM intake_sessions
            WHERE user_id = $1
              AND stored_at > NOW() - ($2::BIGINT * INTERVAL '1 second')
            "#,
        )
        .bind(user_id.as_str())
        .bind(self.ttl_secs)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch intake session", e))?;

        match row.map(row_to_session).transpose() {
            Ok(session) => Ok(session),
            Err(e) => {
                tracing::warn!(%user_id, error = %e, "discarding undecodable intake session");
                Ok(None)
            }
        }
    }

    async fn put(&self, user_id: &UserId, session: &IntakeSession) -> Result<(), SessionStoreError> {
        let collected = serde_json::to_value(session.collected_data())
            .map_err(|e| SessionStoreError::SerializationFailed(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO intake_sessions (
                user_id, current_step, collected_data, created_at, updated_at, stored_at
            ) VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                current_step = EXCLUDED.current_step,
                collected_data = EXCLUDED.collected_data,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at,
                stored_at = EXCLUDED.stored_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(session.current_step().as_str())
        .bind(collected)
        .bind(session.created_at().as_datetime())
        .bind(session.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to save intake session", e))?;

        Ok(())
    }

    async fn remove(&self, user_id: &UserId) -> Result<bool, SessionStoreError> {
        let result = sqlx::query("DELETE FROM intake_sessions WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| database_error("Failed to delete intake session", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        let result = sqlx::query(
            "DELETE FROM intake_sessions WHERE stored_at <= NOW() - ($1::BIGINT * INTERVAL '1 second')",
        )
        .bind(self.ttl_secs)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("Failed to purge intake sessions", e))?;

        Ok(result.rows_affected())
    }
}

impl std::fmt::Debug for PostgresSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSessionStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn database_error(context: &str, e: sqlx::Error) -> SessionStoreError {
    SessionStoreError::Unavailable(format!("{}: {}", context, e))
}

fn decode_error(column: &str, e: impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::DeserializationFailed(format!("{}: {}", column, e))
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<IntakeSession, SessionStoreError> {
    let step: String = row
        .try_get("current_step")
        .map_err(|e| decode_error("current_step", e))?;
    let collected: serde_json::Value = row
        .try_get("collected_data")
        .map_err(|e| decode_error("collected_data", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| decode_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| decode_error("updated_at", e))?;

    decode_session(&step, collected, created_at, updated_at)
}

fn decode_session(
    step: &str,
    collected: serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Result<IntakeSession, SessionStoreError> {
    let step: Step = step.parse().map_err(|e| decode_error("current_step", e))?;
    let collected: CollectedData =
        serde_json::from_value(collected).map_err(|e| decode_error("collected_data", e))?;

    Ok(IntakeSession::reconstitute(
        step,
        collected,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
