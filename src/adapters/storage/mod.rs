//! Storage Adapters
//!
//! Process-local implementation of the SessionStore port plus the
//! background sweeper that enforces TTLs on stores without native expiry.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{spawn_expiry_sweeper, InMemorySessionStore};
//!
//! let store = Arc::new(InMemorySessionStore::with_ttl(Duration::from_secs(3600)));
//! let sweeper = spawn_expiry_sweeper(store.clone(), Duration::from_secs(60), shutdown_rx);
//! ```

mod in_memory_session_store;
mod sweeper;

pub use in_memory_session_store::InMemorySessionStore;
pub use sweeper::{spawn_expiry_sweeper, SessionSweeper};
