//! Service configuration: optional TOML file plus environment overrides.
//!
//! Resolution order (later wins):
//!   1. built-in defaults (`ServiceConfig::default`)
//!   2. TOML file at LESSON_CONFIG_PATH, if set and parseable
//!   3. env vars PORT, DATA_DIR, STATIC_DIR, CORS_ORIGINS, AUTH_TOKEN
//!
//! Example TOML:
//! ```toml
//! port = 8000
//! data_dir = "./data"
//! cors_origins = ["http://localhost:3000"]
//!
//! [auth]
//! token = "fake-jwt-token-123"
//! username = "testuser"
//!
//! [chat]
//! system_template = "You are an English conversation partner. Adjust difficulty to {level} and focus on {specialty}."
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info, warn};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  pub port: u16,
  /// Content Store root: one subfolder per topic.
  pub data_dir: PathBuf,
  /// Built frontend served for every non-API path.
  pub static_dir: PathBuf,
  /// Empty means any origin.
  pub cors_origins: Vec<String>,
  pub auth: AuthConfig,
  pub chat: ChatConfig,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      port: 8000,
      data_dir: PathBuf::from("./data"),
      static_dir: PathBuf::from("./static"),
      cors_origins: Vec::new(),
      auth: AuthConfig::default(),
      chat: ChatConfig::default(),
    }
  }
}

/// Static shared-secret scheme and the single demo profile it unlocks.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
  pub token: String,
  pub username: String,
  pub level: String,
  pub total_words: u32,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      token: "fake-jwt-token-123".into(),
      username: "testuser".into(),
      level: "B2".into(),
      total_words: 1234,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
  /// `{level}` and `{specialty}` are substituted per request.
  pub system_template: String,
}

impl Default for ChatConfig {
  fn default() -> Self {
    Self {
      system_template: "You are an English conversation partner. Adjust your difficulty to {level} and focus on {specialty}. Reply concisely and naturally.".into(),
    }
  }
}

impl ServiceConfig {
  /// Defaults, then LESSON_CONFIG_PATH, then env overrides.
  pub fn load() -> Self {
    let base = load_file_from_env().unwrap_or_default();
    base.with_overrides(|key| std::env::var(key).ok())
  }

  /// Apply env-style overrides through `lookup` (injected so tests don't touch the process env).
  pub fn with_overrides<F>(mut self, lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(p) = lookup("PORT") {
      match p.parse::<u16>() {
        Ok(port) => self.port = port,
        Err(e) => warn!(target: "lesson_backend", value = %p, error = %e, "Ignoring invalid PORT"),
      }
    }
    if let Some(dir) = lookup("DATA_DIR").filter(|s| !s.is_empty()) {
      self.data_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("STATIC_DIR").filter(|s| !s.is_empty()) {
      self.static_dir = PathBuf::from(dir);
    }
    if let Some(origins) = lookup("CORS_ORIGINS") {
      self.cors_origins = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect();
    }
    if let Some(token) = lookup("AUTH_TOKEN").filter(|s| !s.is_empty()) {
      self.auth.token = token;
    }
    self
  }
}

/// Attempt to load `ServiceConfig` from LESSON_CONFIG_PATH. On any parsing/IO error, returns None.
fn load_file_from_env() -> Option<ServiceConfig> {
  let path = std::env::var("LESSON_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ServiceConfig>(&s) {
      Ok(cfg) => {
        info!(target: "lesson_backend", %path, "Loaded service config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "lesson_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "lesson_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_keeps_defaults_for_missing_keys() {
    let cfg: ServiceConfig = toml::from_str(
      r#"
        data_dir = "/srv/lessons"
        [auth]
        username = "alice"
      "#,
    )
    .expect("toml");
    assert_eq!(cfg.data_dir, PathBuf::from("/srv/lessons"));
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.auth.username, "alice");
    assert_eq!(cfg.auth.token, "fake-jwt-token-123");
    assert!(cfg.chat.system_template.contains("{level}"));
  }

  #[test]
  fn env_overrides_win_over_file_values() {
    let cfg = ServiceConfig::default().with_overrides(|key| match key {
      "PORT" => Some("9100".into()),
      "DATA_DIR" => Some("/tmp/data".into()),
      "CORS_ORIGINS" => Some("http://a.test, ,http://b.test".into()),
      "AUTH_TOKEN" => Some("s3cret".into()),
      _ => None,
    });
    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.data_dir, PathBuf::from("/tmp/data"));
    assert_eq!(cfg.cors_origins, vec!["http://a.test".to_string(), "http://b.test".to_string()]);
    assert_eq!(cfg.auth.token, "s3cret");
  }

  #[test]
  fn invalid_port_is_ignored() {
    let cfg = ServiceConfig::default().with_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()));
    assert_eq!(cfg.port, 8000);
  }
}
