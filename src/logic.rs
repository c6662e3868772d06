//! Request-scoped pipelines behind the lesson endpoints.
//!
//!   - detail: resolve -> normalize
//!   - quiz:   resolve -> normalize -> synthesize
//!
//! Nothing is cached between calls; each request re-reads its lesson file.

use rand::Rng;
use tracing::{info, instrument};

use crate::domain::LessonView;
use crate::error::LessonError;
use crate::normalize::normalize;
use crate::protocol::QuizOut;
use crate::quiz::synthesize;
use crate::store::ContentStore;

#[instrument(level = "info", skip(store))]
pub fn lesson_detail(store: &ContentStore, lesson_id: &str) -> Result<LessonView, LessonError> {
  let raw = store.resolve(lesson_id)?;
  let view = normalize(lesson_id, &raw);
  info!(target: "lesson", %lesson_id, path = %raw.path.display(), total_words = view.total_words, "Lesson resolved");
  Ok(view)
}

#[instrument(level = "info", skip(store, rng))]
pub fn lesson_quiz<R: Rng + ?Sized>(store: &ContentStore, lesson_id: &str, rng: &mut R) -> Result<QuizOut, LessonError> {
  let view = lesson_detail(store, lesson_id)?;
  let questions = synthesize(&view.words, rng)?;
  info!(target: "quiz", %lesson_id, questions = questions.len(), "Quiz generated");
  Ok(QuizOut { lesson_id: lesson_id.to_string(), questions })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};
  use std::fs;
  use tempfile::TempDir;

  fn store() -> (TempDir, ContentStore) {
    let td = TempDir::new().expect("tempdir");
    let dir = td.path().join("computer-science");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(
      dir.join("Lesson5.json"),
      r#"{"words":[{"word":"latency","example":"Network latency affects performance."}]}"#,
    )
    .expect("write");
    fs::write(
      dir.join("lesson6.json"),
      r#"{"title":"Vocabulary","paragraphReview1":"Review me.","words":[
        {"word":"brief","example":"Keep it brief."},
        {"word":"ample","example":"Ample time remained."},
        {"word":"vivid","example":"A vivid memory."}]}"#,
    )
    .expect("write");
    let store = ContentStore::new(td.path());
    (td, store)
  }

  #[test]
  fn one_word_lesson_resolves_but_cannot_make_a_quiz() {
    let (_td, store) = store();
    let view = lesson_detail(&store, "computer-science-lesson-5").expect("detail");
    assert_eq!(view.total_words, 1);
    assert_eq!(view.title, "Lesson 5");
    let err = lesson_quiz(&store, "computer-science-lesson-5", &mut StdRng::seed_from_u64(0)).unwrap_err();
    assert!(matches!(err, LessonError::InsufficientWords { available: 1 }));
  }

  #[test]
  fn quiz_follows_word_order() {
    let (_td, store) = store();
    let quiz = lesson_quiz(&store, "computer-science-lesson-06", &mut StdRng::seed_from_u64(9)).expect("quiz");
    assert_eq!(quiz.lesson_id, "computer-science-lesson-06");
    let words: Vec<&str> = quiz.questions.iter().map(|q| q.word.as_str()).collect();
    assert_eq!(words, ["brief", "ample", "vivid"]);
    assert!(quiz.questions.iter().all(|q| q.blank_sentence.contains("____")));
  }

  #[test]
  fn detail_is_byte_identical_across_calls() {
    let (_td, store) = store();
    let a = serde_json::to_vec(&lesson_detail(&store, "computer-science-lesson-6").expect("detail")).expect("ser");
    let b = serde_json::to_vec(&lesson_detail(&store, "computer-science-lesson-6").expect("detail")).expect("ser");
    assert_eq!(a, b);
  }
}
