//! HTTP adapter for chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, SessionStateResponse,
    StartChatResponse,
};
pub use handlers::ChatAppState;
pub use routes::chat_routes;
