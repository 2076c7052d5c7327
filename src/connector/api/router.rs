use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use super::controller::chat_controller;
use super::Container;

/// Build the HTTP application: the chat endpoint plus a liveness probe.
pub fn router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/api/chat", post(chat_controller::chat))
        .route("/healthz", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}
