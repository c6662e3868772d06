//! Reshape a loaded lesson document into the detail response.
//!
//! Lesson files went through several authoring passes and the review paragraphs
//! picked up different key spellings along the way. Each logical field has an
//! ordered alias list; the first alias present as a string wins, even when empty.

use serde_json::Value;
use tracing::debug;

use crate::domain::{LessonDocument, LessonId, LessonView, WordEntry};

const TITLE_KEYS: &[&str] = &["title"];
const PARAGRAPH_KEYS: &[&str] = &["paragraph"];
const PARAGRAPH_REVIEW1_KEYS: &[&str] = &["paragraph_review1", "paragraphReview1", "paragraph_review_1", "paragraph1_review"];
const PARAGRAPH_REVIEW2_KEYS: &[&str] = &["paragraph_review2", "paragraphReview2", "paragraph_review_2", "paragraph2_review"];
const PARAGRAPH_REVIEW3_KEYS: &[&str] = &["paragraph_review3", "paragraphReview3", "paragraph_review_3", "paragraph3_review"];

/// Pure: no I/O, same input gives the same view.
pub fn normalize(lesson_id: &str, raw: &LessonDocument) -> LessonView {
  let title = raw
    .first_str(TITLE_KEYS)
    .map(str::to_string)
    .unwrap_or_else(|| default_title(lesson_id));
  let text = |keys: &[&str]| raw.first_str(keys).unwrap_or_default().to_string();

  let words: Vec<WordEntry> = raw.word_values().iter().filter_map(WordEntry::from_value).collect();
  let dropped = raw.word_values().len() - words.len();
  if dropped > 0 {
    debug!(target: "lesson", %lesson_id, dropped, "Ignoring non-object entries in words");
  }

  LessonView {
    lesson_id: lesson_id.to_string(),
    title,
    paragraph: text(PARAGRAPH_KEYS),
    paragraph_review1: text(PARAGRAPH_REVIEW1_KEYS),
    paragraph_review2: text(PARAGRAPH_REVIEW2_KEYS),
    paragraph_review3: text(PARAGRAPH_REVIEW3_KEYS),
    total_words: words.len(),
    words,
    raw: Value::Object(raw.fields.clone()),
  }
}

/// "Lesson {n}" from the id's number; falls back to the whole id if it has none.
fn default_title(lesson_id: &str) -> String {
  match LessonId::parse(lesson_id) {
    Ok(id) => format!("Lesson {}", id.number),
    Err(_) => format!("Lesson {lesson_id}"),
  }
}
