//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `storage` - In-process session store and expiry sweeper
//! - `redis` - Session store backed by Redis
//! - `postgres` - Session store backed by PostgreSQL

pub mod http;
pub mod postgres;
pub mod redis;
pub mod storage;

pub use self::http::{api_router, ChatAppState};
pub use self::postgres::PostgresSessionStore;
pub use self::redis::RedisSessionStore;
pub use self::storage::{spawn_expiry_sweeper, InMemorySessionStore, SessionSweeper};
