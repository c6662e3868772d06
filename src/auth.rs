//! Static shared-secret auth. One configured token unlocks one demo profile;
//! there are no accounts and nothing is persisted.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::protocol::{ErrorOut, UserOut};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
  #[error("username missing")]
  MissingUsername,
  #[error("invalid token")]
  InvalidToken,
}

impl IntoResponse for AuthError {
  fn into_response(self) -> Response {
    let status = match self {
      AuthError::MissingUsername => StatusCode::BAD_REQUEST,
      AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
    };
    (status, Json(ErrorOut { detail: self.to_string() })).into_response()
  }
}

impl AuthConfig {
  pub fn user(&self) -> UserOut {
    UserOut {
      username: self.username.clone(),
      level: self.level.clone(),
      total_words: self.total_words,
    }
  }

  /// Any non-empty username gets the shared token; the password is not checked.
  pub fn login(&self, username: &str) -> Result<(String, UserOut), AuthError> {
    if username.is_empty() {
      warn!(target: "auth", "Login rejected: username missing");
      return Err(AuthError::MissingUsername);
    }
    info!(target: "auth", %username, "Login accepted");
    Ok((self.token.clone(), self.user()))
  }

  pub fn whoami(&self, token: &str) -> Result<UserOut, AuthError> {
    if token != self.token {
      return Err(AuthError::InvalidToken);
    }
    Ok(self.user())
  }
}
