//! Redis adapters.
//!
//! - `RedisSessionStore` - SessionStore backed by Redis keys with native expiry

mod session_store;

pub use session_store::RedisSessionStore;
