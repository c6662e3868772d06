//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; lesson ids and sizes are logged, bodies are not.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::auth::AuthError;
use crate::catalog::GENRES;
use crate::domain::LessonView;
use crate::error::LessonError;
use crate::logic::{lesson_detail, lesson_quiz};
use crate::protocol::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_login(
  State(state): State<Arc<AppState>>,
  Json(body): Json<LoginIn>,
) -> Result<Json<LoginOut>, AuthError> {
  let (token, user) = state.config.auth.login(&body.username)?;
  Ok(Json(LoginOut { token, user }))
}

#[instrument(level = "info", skip(state, q))]
pub async fn http_get_me(
  State(state): State<Arc<AppState>>,
  Query(q): Query<MeQuery>,
) -> Result<Json<MeOut>, AuthError> {
  let user = state.config.auth.whoami(&q.token)?;
  Ok(Json(MeOut { user }))
}

#[instrument(level = "info")]
pub async fn http_get_genres() -> impl IntoResponse { Json(GenresOut { genres: GENRES }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_lessons(
  State(state): State<Arc<AppState>>,
  Path(genre_id): Path<String>,
) -> Result<Json<LessonsOut>, LessonError> {
  let lessons = state.store.list_lessons(&genre_id).inspect_err(log_lesson_error)?;
  info!(target: "lesson", %genre_id, count = lessons.len(), "HTTP lesson list served");
  Ok(Json(LessonsOut { lessons }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Path(lesson_id): Path<String>,
) -> Result<Json<LessonView>, LessonError> {
  let view = lesson_detail(&state.store, &lesson_id).inspect_err(log_lesson_error)?;
  Ok(Json(view))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_quiz(
  State(state): State<Arc<AppState>>,
  Path(lesson_id): Path<String>,
) -> Result<Json<QuizOut>, LessonError> {
  let quiz = lesson_quiz(&state.store, &lesson_id, &mut rand::thread_rng()).inspect_err(log_lesson_error)?;
  Ok(Json(quiz))
}

#[instrument(level = "info", skip(state, body), fields(level = %body.level, specialty = %body.specialty, message_len = body.message.len()))]
pub async fn http_post_chat(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> impl IntoResponse {
  let Some(oa) = &state.openai else {
    warn!(target: "chat", "Chat requested but OpenAI is disabled");
    return (StatusCode::SERVICE_UNAVAILABLE, Json(ErrorOut { detail: "chat is not configured".into() })).into_response();
  };
  match oa.partner_reply(&state.config.chat, &body.message, &body.level, &body.specialty).await {
    Ok(reply) => Json(ChatOut { reply }).into_response(),
    Err(e) => {
      error!(target: "chat", error = %trunc_for_log(&e, 300), "OpenAI chat failed");
      (StatusCode::BAD_GATEWAY, Json(ErrorOut { detail: e })).into_response()
    }
  }
}

/// Server-side faults are errors; caller mistakes are only worth a warning.
fn log_lesson_error(e: &LessonError) {
  if e.status().is_server_error() {
    error!(target: "lesson", error = %e, "Lesson request failed");
  } else {
    warn!(target: "lesson", error = %e, "Lesson request rejected");
  }
}
