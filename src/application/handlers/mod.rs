//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod intake;

pub use intake::{
    GetIntakeSessionHandler, GetIntakeSessionQuery, IntakeError, ProcessMessageCommand,
    ProcessMessageHandler, ProcessMessageResult, ResetIntakeSessionCommand,
    ResetIntakeSessionHandler, StartChatHandler, StartChatResult,
};
