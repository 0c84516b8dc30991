//! Errors raised by the intake handlers.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};
use crate::ports::SessionStoreError;

/// Errors that can occur while serving an intake request.
///
/// The conversation itself never fails; a bad answer is a rejected turn.
/// These cover the request envelope and the session store.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Invalid user id: {0}")]
    InvalidUserId(#[from] ValidationError),

    #[error("No intake session for user {0}")]
    NotFound(UserId),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl IntakeError {
    pub fn not_found(user_id: UserId) -> Self {
        IntakeError::NotFound(user_id)
    }

    /// Returns the API error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            IntakeError::InvalidUserId(_) => ErrorCode::ValidationFailed,
            IntakeError::NotFound(_) => ErrorCode::SessionNotFound,
            IntakeError::Store(SessionStoreError::Unavailable(_)) => ErrorCode::StoreUnavailable,
            IntakeError::Store(_) => ErrorCode::InternalError,
        }
    }
}
