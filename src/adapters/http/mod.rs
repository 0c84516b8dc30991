//! HTTP adapters - REST API implementations.
//!
//! The chat module exposes the intake conversation. [`api_router`] mounts it
//! under `/api/v1` and applies the cross-cutting tower layers.

pub mod chat;

pub use chat::{chat_routes, ChatAppState};

use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the full application router.
///
/// Every request gets an `x-request-id` (generated when absent) that is
/// echoed on the response and recorded by the trace layer.
pub fn api_router(state: ChatAppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api/v1", chat_routes())
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Permissive CORS unless explicit origins are configured.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
