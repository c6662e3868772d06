//! Minimal OpenAI client for the conversation-partner chat.
//!
//! Only chat.completions is used, plain text out. Calls log model names and
//! token usage, never message contents or the API key.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::config::ChatConfig;

#[derive(Clone)]
pub struct OpenAI {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub chat_model: String,
}

impl OpenAI {
  /// Construct the client if we find OPENAI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())?;
    let base_url =
      std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
    let chat_model =
      std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".into());

    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .ok()?;

    Some(Self { client, api_key, base_url, chat_model })
  }

  /// One conversational turn, tuned to the learner's level and specialty.
  #[instrument(level = "info", skip(self, chat, message), fields(model = %self.chat_model, message_len = message.len()))]
  pub async fn partner_reply(
    &self,
    chat: &ChatConfig,
    message: &str,
    level: &str,
    specialty: &str,
  ) -> Result<String, String> {
    let system = system_prompt(&chat.system_template, level, specialty);
    self.chat_plain(&system, message, 0.7).await
  }

  async fn chat_plain(&self, system: &str, user: &str, temperature: f32) -> Result<String, String> {
    let url = format!("{}/chat/completions", self.base_url);
    let req = ChatCompletionRequest {
      model: self.chat_model.clone(),
      messages: vec![
        ChatMessageReq { role: "system".into(), content: system.into() },
        ChatMessageReq { role: "user".into(), content: user.into() },
      ],
      temperature,
    };

    let res = self.client.post(&url)
      .header(USER_AGENT, "lesson-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
      .json(&req).send().await.map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_openai_error(&body).unwrap_or(body);
      return Err(format!("OpenAI HTTP {}: {}", status, msg));
    }

    let body: ChatCompletionResponse = res.json().await.map_err(|e| e.to_string())?;
    if let Some(usage) = &body.usage {
      info!(target: "chat", prompt_tokens = ?usage.prompt_tokens, completion_tokens = ?usage.completion_tokens, total_tokens = ?usage.total_tokens, "OpenAI usage");
    }
    Ok(first_choice_text(body))
  }
}

fn system_prompt(template: &str, level: &str, specialty: &str) -> String {
  template.replace("{level}", level).replace("{specialty}", specialty)
}

fn first_choice_text(body: ChatCompletionResponse) -> String {
  body.choices
    .into_iter()
    .next()
    .and_then(|c| c.message.content)
    .unwrap_or_default()
    .trim()
    .to_string()
}

// --- Chat DTOs ---

#[derive(Serialize)]
struct ChatCompletionRequest {
  model: String,
  messages: Vec<ChatMessageReq>,
  temperature: f32,
}
#[derive(Serialize)]
struct ChatMessageReq { role: String, content: String }

#[derive(Deserialize)]
struct ChatCompletionResponse {
  choices: Vec<ChatChoice>,
  #[serde(default)] usage: Option<Usage>,
}
#[derive(Deserialize)]
struct ChatChoice { message: ChatMessageResp }
#[derive(Deserialize)]
struct ChatMessageResp { content: Option<String> }
#[derive(Deserialize)]
struct Usage {
  #[serde(default)] prompt_tokens: Option<u32>,
  #[serde(default)] completion_tokens: Option<u32>,
  #[serde(default)] total_tokens: Option<u32>,
}

/// Try to extract a clean error message from OpenAI error body.
fn extract_openai_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn system_prompt_fills_level_and_specialty() {
    let p = system_prompt(&ChatConfig::default().system_template, "B2", "medicine");
    assert!(p.contains("B2") && p.contains("medicine"), "{p}");
    assert!(!p.contains('{'));
  }

  #[test]
  fn reply_text_is_first_choice_trimmed() {
    let body: ChatCompletionResponse = serde_json::from_str(
      r#"{"choices":[{"message":{"content":"  Sure, let's talk.\n"}},{"message":{"content":"other"}}]}"#,
    )
    .expect("json");
    assert_eq!(first_choice_text(body), "Sure, let's talk.");

    let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).expect("json");
    assert_eq!(first_choice_text(empty), "");
  }

  #[test]
  fn error_body_message_is_extracted() {
    assert_eq!(
      extract_openai_error(r#"{"error":{"message":"Incorrect API key","type":"invalid_request_error"}}"#).as_deref(),
      Some("Incorrect API key")
    );
    assert_eq!(extract_openai_error("<html>bad gateway</html>"), None);
  }
}
