//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSessionStore` - Intake sessions in the `intake_sessions` table

mod session_store;

pub use session_store::PostgresSessionStore;
