//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
mod user_locks;

pub use handlers::{
    GetIntakeSessionHandler, GetIntakeSessionQuery, IntakeError, ProcessMessageCommand,
    ProcessMessageHandler, ProcessMessageResult, ResetIntakeSessionCommand,
    ResetIntakeSessionHandler, StartChatHandler, StartChatResult,
};
pub use user_locks::{UserLockGuard, UserLocks};
