//! Error taxonomy for lesson resolution and quiz synthesis, plus its HTTP mapping.

use std::path::PathBuf;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error)]
pub enum LessonError {
  #[error("invalid lesson id format: {0}")]
  BadIdentifier(String),

  #[error("genre not found: {0}")]
  TopicNotFound(String),

  #[error("lesson file not found: {0}")]
  LessonNotFound(String),

  #[error("failed to read lesson file {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse lesson file {}: {source}", path.display())]
  CorruptDocument {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("lesson has no words")]
  NoWords,

  #[error("not enough words for quiz: need 3, found {available}")]
  InsufficientWords { available: usize },
}

impl LessonError {
  pub fn status(&self) -> StatusCode {
    match self {
      LessonError::BadIdentifier(_) => StatusCode::BAD_REQUEST,
      LessonError::TopicNotFound(_) | LessonError::LessonNotFound(_) => StatusCode::NOT_FOUND,
      LessonError::NoWords | LessonError::InsufficientWords { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      LessonError::Io { .. } | LessonError::CorruptDocument { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for LessonError {
  fn into_response(self) -> Response {
    (self.status(), Json(ErrorOut { detail: self.to_string() })).into_response()
  }
}
