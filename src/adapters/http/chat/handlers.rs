//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    GetIntakeSessionHandler, GetIntakeSessionQuery, IntakeError, ProcessMessageCommand,
    ProcessMessageHandler, ResetIntakeSessionCommand, ResetIntakeSessionHandler,
    StartChatHandler, UserLocks,
};
use crate::domain::foundation::UserId;
use crate::domain::intake::IntakeRules;
use crate::ports::SessionStore;

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionStateResponse,
    StartChatResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat endpoints.
///
/// Cloned per request. All handlers share one lock registry so resets and
/// turns for the same user are serialized.
#[derive(Clone)]
pub struct ChatAppState {
    pub store: Arc<dyn SessionStore>,
    pub locks: UserLocks,
    pub rules: IntakeRules,
}

impl ChatAppState {
    pub fn new(store: Arc<dyn SessionStore>, rules: IntakeRules) -> Self {
        Self {
            store,
            locks: UserLocks::new(),
            rules,
        }
    }

    pub fn process_message_handler(&self) -> ProcessMessageHandler {
        ProcessMessageHandler::new(self.store.clone(), self.locks.clone(), self.rules)
    }

    pub fn start_chat_handler(&self) -> StartChatHandler {
        StartChatHandler::new(self.store.clone(), self.rules)
    }

    pub fn get_session_handler(&self) -> GetIntakeSessionHandler {
        GetIntakeSessionHandler::new(self.store.clone())
    }

    pub fn reset_session_handler(&self) -> ResetIntakeSessionHandler {
        ResetIntakeSessionHandler::new(self.store.clone(), self.locks.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/chat - Process one message
pub async fn chat(State(state): State<ChatAppState>, Json(req): Json<ChatRequest>) -> Response {
    let cmd = match ProcessMessageCommand::new(req.user_id, req.message) {
        Ok(cmd) => cmd,
        Err(e) => return handle_intake_error(e),
    };

    match state.process_message_handler().handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ChatResponse::from(result))).into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// POST /api/v1/start_chat - Open a conversation for a new user
pub async fn start_chat(State(state): State<ChatAppState>) -> Response {
    match state.start_chat_handler().handle().await {
        Ok(result) => {
            (StatusCode::CREATED, Json(StartChatResponse::from(result))).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/v1/chat/:user_id - Inspect the stored conversation
pub async fn get_chat(
    State(state): State<ChatAppState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_intake_error(e.into()),
    };

    let query = GetIntakeSessionQuery {
        user_id: user_id.clone(),
    };
    match state.get_session_handler().handle(query).await {
        Ok(session) => {
            (StatusCode::OK, Json(SessionStateResponse::new(&user_id, session))).into_response()
        }
        Err(e) => handle_intake_error(e),
    }
}

/// DELETE /api/v1/chat/:user_id - Discard the conversation
pub async fn reset_chat(
    State(state): State<ChatAppState>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => return handle_intake_error(e.into()),
    };

    match state
        .reset_session_handler()
        .handle(ResetIntakeSessionCommand { user_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_intake_error(e),
    }
}

/// GET /api/v1/health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_intake_error(error: IntakeError) -> Response {
    let status = match &error {
        IntakeError::InvalidUserId(_) => StatusCode::BAD_REQUEST,
        IntakeError::NotFound(_) => StatusCode::NOT_FOUND,
        IntakeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::from(&error))).into_response()
}
