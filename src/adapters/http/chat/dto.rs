//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{IntakeError, ProcessMessageResult, StartChatResult};
use crate::domain::foundation::{ErrorCode, UserId};
use crate::domain::intake::{CollectedData, IntakeSession, Step};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One message from the user.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply to one message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub current_step: Step,
    pub collected_data: CollectedData,
}

impl From<ProcessMessageResult> for ChatResponse {
    fn from(result: ProcessMessageResult) -> Self {
        Self {
            message: result.message,
            current_step: result.current_step,
            collected_data: result.collected_data,
        }
    }
}

/// Reply to `start_chat`.
#[derive(Debug, Clone, Serialize)]
pub struct StartChatResponse {
    pub user_id: String,
    pub message: String,
    pub current_step: Step,
}

impl From<StartChatResult> for StartChatResponse {
    fn from(result: StartChatResult) -> Self {
        Self {
            user_id: result.user_id.to_string(),
            message: result.message,
            current_step: result.current_step,
        }
    }
}

/// Stored conversation state for one user.
#[derive(Debug, Clone, Serialize)]
pub struct SessionStateResponse {
    pub user_id: String,
    pub current_step: Step,
    pub collected_data: CollectedData,
    pub created_at: String,
    pub updated_at: String,
}

impl SessionStateResponse {
    pub fn new(user_id: &UserId, session: IntakeSession) -> Self {
        Self {
            user_id: user_id.to_string(),
            current_step: session.current_step(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
            collected_data: session.collected_data().clone(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&IntakeError> for ErrorResponse {
    fn from(error: &IntakeError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}
