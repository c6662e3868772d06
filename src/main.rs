//! Lesson Backend · vocabulary lessons and auto-generated quizzes
//!
//! - Axum HTTP API over a read-only Content Store (topic folders of LessonN.json)
//! - Multiple-choice quizzes synthesized per request from each lesson's words
//! - Optional OpenAI conversation partner (via environment variables)
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 8000)
//!   DATA_DIR           : Content Store root (default "./data")
//!   STATIC_DIR         : built frontend (default "./static")
//!   CORS_ORIGINS       : comma-separated allow list; unset = any origin
//!   AUTH_TOKEN         : shared secret returned by /api/login
//!   LESSON_CONFIG_PATH : path to TOML config (see `config`)
//!   OPENAI_API_KEY     : enables /api/chat if present
//!   OPENAI_BASE_URL    : default "https://api.openai.com/v1"
//!   OPENAI_CHAT_MODEL  : default "gpt-3.5-turbo"
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod auth;
mod catalog;
mod config;
mod domain;
mod error;
mod logic;
mod normalize;
mod openai;
mod protocol;
mod quiz;
mod routes;
mod state;
mod store;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let config = ServiceConfig::load();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

  // Shared read-only state: Content Store handle, config, optional OpenAI client.
  let state = Arc::new(AppState::from_config(config));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "lesson_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "lesson_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  match tokio::signal::ctrl_c().await {
    Ok(()) => info!(target: "lesson_backend", "Shutdown signal received"),
    Err(e) => {
      warn!(target: "lesson_backend", error = %e, "Could not listen for shutdown signal; running until killed");
      std::future::pending::<()>().await;
    }
  }
}
