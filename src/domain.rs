//! Domain models: lesson identifiers, on-disk lesson documents, word entries,
//! the normalized lesson view and derived quiz questions.

use std::{fmt, path::PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LessonError;

/// Delimiter between topic folder and lesson number in an external lesson id.
pub const LESSON_DELIMITER: &str = "-lesson-";

/// External, request-scoped lesson identifier: `<topic>-lesson-<n>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonId {
  pub topic: String,
  /// Number exactly as written in the id (may be zero-padded).
  pub number_text: String,
  /// Same digits with leading zeros trimmed. Kept as text so any length works.
  pub number: String,
}

impl LessonId {
  /// Split on the *last* `-lesson-` so topic names may contain the delimiter themselves.
  pub fn parse(raw: &str) -> Result<Self, LessonError> {
    let (topic, number_text) = raw
      .rsplit_once(LESSON_DELIMITER)
      .ok_or_else(|| LessonError::BadIdentifier(raw.to_string()))?;

    if number_text.is_empty() || !number_text.bytes().all(|b| b.is_ascii_digit()) {
      return Err(LessonError::BadIdentifier(raw.to_string()));
    }
    let number = canonical_number(number_text).to_string();

    Ok(Self { topic: topic.to_string(), number_text: number_text.to_string(), number })
  }
}

/// Strip leading zeros from a non-empty digit string ("007" -> "7", "000" -> "0").
pub fn canonical_number(digits: &str) -> &str {
  match digits.trim_start_matches('0') {
    "" => "0",
    trimmed => trimmed,
  }
}

impl fmt::Display for LessonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}{}", self.topic, LESSON_DELIMITER, self.number_text)
  }
}

/// A lesson file as loaded from the Content Store. Never mutated.
#[derive(Clone, Debug)]
pub struct LessonDocument {
  pub path: PathBuf,
  pub fields: Map<String, Value>,
}

impl LessonDocument {
  /// String value under `key`; non-string values count as absent.
  pub fn str_field(&self, key: &str) -> Option<&str> {
    self.fields.get(key).and_then(Value::as_str)
  }

  /// First alias that is present as a string, in the given order. Empty strings count as present.
  pub fn first_str(&self, aliases: &[&str]) -> Option<&str> {
    aliases.iter().find_map(|k| self.str_field(k))
  }

  /// The raw `words` array, if the key holds one.
  pub fn word_values(&self) -> &[Value] {
    match self.fields.get("words") {
      Some(Value::Array(items)) => items,
      _ => &[],
    }
  }
}

/// One vocabulary item. `word` and `example` are the only fields the core reads;
/// everything else (meaning, synonyms, ...) rides along in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct WordEntry {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub word: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub example: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl WordEntry {
  /// Lift a JSON object into a word entry. Non-objects yield None.
  /// A `word`/`example` that isn't a string stays in `extra` untouched.
  pub fn from_value(value: &Value) -> Option<Self> {
    let mut extra = value.as_object()?.clone();
    let word = take_string(&mut extra, "word");
    let example = take_string(&mut extra, "example");
    Some(Self { word, example, extra })
  }

  /// Eligible for quiz synthesis: a present, non-empty word.
  pub fn quiz_word(&self) -> Option<&str> {
    self.word.as_deref().filter(|w| !w.is_empty())
  }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
  match map.get(key) {
    Some(Value::String(_)) => match map.remove(key) {
      Some(Value::String(s)) => Some(s),
      _ => None,
    },
    _ => None,
  }
}

/// Normalized lesson shape served by the detail endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LessonView {
  pub lesson_id: String,
  pub title: String,
  pub paragraph: String,
  pub paragraph_review1: String,
  pub paragraph_review2: String,
  pub paragraph_review3: String,
  pub words: Vec<WordEntry>,
  pub total_words: usize,
  /// Verbatim document for clients that need topic-specific extras.
  pub raw: Value,
}

/// One fill-in-the-blank multiple-choice question. Built per request, never stored.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuizQuestion {
  pub word: String,
  pub sentence: String,
  pub blank_sentence: String,
  pub choices: Vec<String>,
  pub answer_index: usize,
}

/// Entry in a topic's lesson listing.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LessonSummary {
  pub id: String,
  pub title: String,
  pub progress: u32,
}
