//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the generation API under a single Axum router: the SSE generation
//! endpoint, topic suggestions, and the static listings (themes, knowledge
//! topics). CORS is wide open; the browser client is served separately.

pub mod generation;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full API router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/agent", post(generation::generate_presentation))
        .route("/api/agent/suggest-topics", post(generation::suggest_topics))
        .route("/api/themes", get(generation::list_themes))
        .route("/api/topics", get(generation::list_topics))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
