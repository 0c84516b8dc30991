//! Axum router configuration for chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat, get_chat, health, reset_chat, start_chat, ChatAppState};

/// Create the chat API router.
///
/// # Routes
/// - `POST /chat` - Process one message
/// - `POST /start_chat` - Open a conversation for a new user
/// - `GET /chat/:user_id` - Inspect the stored conversation
/// - `DELETE /chat/:user_id` - Discard the conversation
/// - `GET /health` - Liveness probe
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/start_chat", post(start_chat))
        .route("/chat/:user_id", get(get_chat).delete(reset_chat))
        .route("/health", get(health))
}
