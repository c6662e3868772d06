//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - JSON API under `/api/...`
/// - Static SPA from `static_dir`; unknown paths get `index.html` (200, so client-side routes load)
/// - CORS (configured origins, or any origin when none are configured)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = &state.config.static_dir;
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_origin(allow_origin(&state.config.cors_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(http::http_health))
        .route("/api/login", post(http::http_post_login))
        .route("/api/me", get(http::http_get_me))
        .route("/api/genres", get(http::http_get_genres))
        .route("/api/lessons/:genre_id", get(http::http_get_lessons))
        .route("/api/lesson/:lesson_id", get(http::http_get_lesson))
        .route("/api/lesson/:lesson_id/quiz", get(http::http_get_quiz))
        .route("/api/chat", post(http::http_post_chat))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::from(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(target: "lesson_backend", origin = %o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}
