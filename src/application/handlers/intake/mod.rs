//! Intake command and query handlers.

mod error;
mod get_session;
mod process_message;
mod reset_session;
mod start_chat;

pub use error::IntakeError;
pub use get_session::{GetIntakeSessionHandler, GetIntakeSessionQuery};
pub use process_message::{ProcessMessageCommand, ProcessMessageHandler, ProcessMessageResult};
pub use reset_session::{ResetIntakeSessionCommand, ResetIntakeSessionHandler};
pub use start_chat::{StartChatHandler, StartChatResult};
