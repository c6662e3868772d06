//! Content Store access: topic folders of numbered lesson files.
//!
//! Read-only at request time. Nothing is cached; every call goes back to disk so
//! edits made by the authoring scripts show up on the next request.

use std::{
  collections::BTreeSet,
  path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::domain::{canonical_number, LessonDocument, LessonId, LessonSummary, LESSON_DELIMITER};
use crate::error::LessonError;

#[derive(Clone, Copy, Debug)]
enum Casing {
  Title,
  Lower,
}

#[derive(Clone, Copy, Debug)]
enum NumberForm {
  /// Number text exactly as it appeared in the id (zero padding kept).
  AsGiven,
  /// Re-rendered from the parsed integer.
  Canonical,
}

/// Filename spellings probed in order; the first regular file wins.
const FILENAME_CANDIDATES: [(Casing, NumberForm); 4] = [
  (Casing::Title, NumberForm::AsGiven),
  (Casing::Lower, NumberForm::AsGiven),
  (Casing::Title, NumberForm::Canonical),
  (Casing::Lower, NumberForm::Canonical),
];

fn candidate_file_name(id: &LessonId, casing: Casing, form: NumberForm) -> String {
  let prefix = match casing {
    Casing::Title => "Lesson",
    Casing::Lower => "lesson",
  };
  match form {
    NumberForm::AsGiven => format!("{prefix}{}.json", id.number_text),
    NumberForm::Canonical => format!("{prefix}{}.json", id.number),
  }
}

/// `Lesson12.json` / `lesson012.json` -> "12". Anything else -> None.
fn lesson_number_from_file_name(name: &str) -> Option<&str> {
  let rest = name.strip_prefix("Lesson").or_else(|| name.strip_prefix("lesson"))?;
  let digits = rest.strip_suffix(".json")?;
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  Some(canonical_number(digits))
}

#[derive(Clone, Debug)]
pub struct ContentStore {
  root: PathBuf,
}

impl ContentStore {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Folder for `topic`, which must be a plain existing subdirectory name.
  fn topic_dir(&self, topic: &str) -> Result<PathBuf, LessonError> {
    let plain = !topic.is_empty()
      && topic != "."
      && topic != ".."
      && !topic.contains(&['/', '\\'][..]);
    if !plain {
      return Err(LessonError::TopicNotFound(topic.to_string()));
    }
    let dir = self.root.join(topic);
    if !dir.is_dir() {
      return Err(LessonError::TopicNotFound(topic.to_string()));
    }
    Ok(dir)
  }

  /// Locate and parse the document for `lesson_id` (`<topic>-lesson-<n>`).
  #[instrument(level = "debug", skip(self), fields(root = %self.root.display()))]
  pub fn resolve(&self, lesson_id: &str) -> Result<LessonDocument, LessonError> {
    let id = LessonId::parse(lesson_id)?;
    let dir = self.topic_dir(&id.topic)?;

    let path = FILENAME_CANDIDATES
      .iter()
      .map(|&(casing, form)| dir.join(candidate_file_name(&id, casing, form)))
      .find(|p| p.is_file())
      .ok_or_else(|| LessonError::LessonNotFound(lesson_id.to_string()))?;

    debug!(target: "lesson", %lesson_id, path = %path.display(), "Lesson file matched");
    load_document(path)
  }

  /// Lessons present in a topic folder, ascending by number. Files are not opened.
  #[instrument(level = "debug", skip(self))]
  pub fn list_lessons(&self, topic: &str) -> Result<Vec<LessonSummary>, LessonError> {
    let dir = self.topic_dir(topic)?;
    let entries = std::fs::read_dir(&dir).map_err(|source| LessonError::Io { path: dir.clone(), source })?;

    let mut numbers = BTreeSet::new();
    for entry in entries {
      let entry = match entry {
        Ok(e) => e,
        Err(e) => {
          warn!(target: "lesson", dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
          continue;
        }
      };
      let file_name = entry.file_name();
      let Some(n) = file_name.to_str().and_then(lesson_number_from_file_name) else {
        continue;
      };
      if entry.path().is_file() {
        // (length, digits) orders canonical numbers numerically.
        numbers.insert((n.len(), n.to_string()));
      }
    }

    Ok(
      numbers
        .into_iter()
        .map(|(_, n)| LessonSummary {
          id: format!("{topic}{LESSON_DELIMITER}{n}"),
          title: format!("Lesson {n}"),
          progress: 0,
        })
        .collect(),
    )
  }
}

fn load_document(path: PathBuf) -> Result<LessonDocument, LessonError> {
  let bytes = match std::fs::read(&path) {
    Ok(b) => b,
    Err(source) => return Err(LessonError::Io { path, source }),
  };
  match serde_json::from_slice::<Map<String, Value>>(&bytes) {
    Ok(fields) => Ok(LessonDocument { path, fields }),
    Err(source) => {
      warn!(target: "lesson", path = %path.display(), error = %source, "Lesson file is not a JSON object");
      Err(LessonError::CorruptDocument { path, source })
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn store_with(files: &[(&str, &str)]) -> (TempDir, ContentStore) {
    let td = TempDir::new().expect("tempdir");
    for (rel, body) in files {
      let path = td.path().join(rel);
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
      }
      fs::write(path, body).expect("write");
    }
    let store = ContentStore::new(td.path());
    (td, store)
  }

  #[test]
  fn resolves_scenario_lesson_and_keeps_word_order() {
    let (_td, store) = store_with(&[(
      "computer-science/Lesson5.json",
      r#"{"title":"Networks","words":[{"word":"latency","example":"Network latency affects performance."},{"word":"bandwidth"}]}"#,
    )]);
    let doc = store.resolve("computer-science-lesson-5").expect("resolve");
    let words: Vec<&str> = doc.word_values().iter().filter_map(|w| w["word"].as_str()).collect();
    assert_eq!(words, ["latency", "bandwidth"]);
    assert!(doc.path.ends_with("computer-science/Lesson5.json"));
  }

  #[test]
  fn accepts_every_filename_spelling() {
    let cases = [
      ("law/Lesson007.json", "law-lesson-007"),
      ("law/lesson8.json", "law-lesson-8"),
      ("law/Lesson9.json", "law-lesson-009"),
      ("law/lesson10.json", "law-lesson-0010"),
    ];
    for (file, id) in cases {
      let (_td, store) = store_with(&[(file, r#"{"words":[]}"#)]);
      let doc = store.resolve(id).unwrap_or_else(|e| panic!("{id}: {e}"));
      assert!(doc.path.ends_with(file), "{id} matched {}", doc.path.display());
    }
  }

  #[test]
  fn title_case_as_given_wins_over_other_spellings() {
    let (_td, store) = store_with(&[
      ("law/Lesson03.json", r#"{"title":"padded title"}"#),
      ("law/lesson03.json", r#"{"title":"padded lower"}"#),
      ("law/Lesson3.json", r#"{"title":"canonical"}"#),
    ]);
    assert_eq!(store.resolve("law-lesson-03").expect("resolve").str_field("title"), Some("padded title"));
    assert_eq!(store.resolve("law-lesson-3").expect("resolve").str_field("title"), Some("canonical"));
  }

  #[test]
  fn directory_named_like_a_lesson_is_skipped() {
    let (_td, store) = store_with(&[("law/Lesson4.json/keep", ""), ("law/lesson4.json", r#"{"title":"file"}"#)]);
    assert_eq!(store.resolve("law-lesson-4").expect("resolve").str_field("title"), Some("file"));
  }

  #[test]
  fn error_kinds() {
    let (_td, store) = store_with(&[("law/Lesson1.json", "[1, 2]"), ("law/Lesson2.json", "{ broken")]);
    assert!(matches!(store.resolve("bogus"), Err(LessonError::BadIdentifier(_))));
    assert!(matches!(store.resolve("unknown-topic-lesson-1"), Err(LessonError::TopicNotFound(_))));
    assert!(matches!(store.resolve("..-lesson-1"), Err(LessonError::TopicNotFound(_))));
    assert!(matches!(store.resolve("law/..-lesson-1"), Err(LessonError::TopicNotFound(_))));
    assert!(matches!(store.resolve("law-lesson-99"), Err(LessonError::LessonNotFound(_))));
    assert!(matches!(store.resolve("law-lesson-1"), Err(LessonError::CorruptDocument { .. })));
    match store.resolve("law-lesson-2") {
      Err(LessonError::CorruptDocument { path, .. }) => assert!(path.ends_with("Lesson2.json")),
      other => panic!("expected corrupt document, got {other:?}"),
    }
  }

  #[test]
  fn edits_on_disk_are_visible_on_next_resolve() {
    let (td, store) = store_with(&[("law/Lesson1.json", r#"{"title":"before"}"#)]);
    assert_eq!(store.resolve("law-lesson-1").expect("resolve").str_field("title"), Some("before"));
    fs::write(td.path().join("law/Lesson1.json"), r#"{"title":"after"}"#).expect("rewrite");
    assert_eq!(store.resolve("law-lesson-1").expect("resolve").str_field("title"), Some("after"));
  }

  #[test]
  fn list_lessons_sorts_and_collapses_spellings() {
    let (_td, store) = store_with(&[
      ("medicine/Lesson10.json", "{}"),
      ("medicine/lesson2.json", "{}"),
      ("medicine/Lesson02.json", "{}"),
      ("medicine/Lesson1.json", "{}"),
      ("medicine/notes.txt", ""),
      ("medicine/Lesson1.json.bak", ""),
      ("medicine/LessonX.json", "{}"),
    ]);
    let ids: Vec<String> = store.list_lessons("medicine").expect("list").into_iter().map(|l| l.id).collect();
    assert_eq!(ids, ["medicine-lesson-1", "medicine-lesson-2", "medicine-lesson-10"]);
    assert!(matches!(store.list_lessons("nope"), Err(LessonError::TopicNotFound(_))));
  }

  #[test]
  fn file_name_parsing() {
    assert_eq!(lesson_number_from_file_name("Lesson12.json"), Some("12"));
    assert_eq!(lesson_number_from_file_name("lesson007.json"), Some("7"));
    assert_eq!(lesson_number_from_file_name("Lesson00.json"), Some("0"));
    assert_eq!(lesson_number_from_file_name("LESSON1.json"), None);
    assert_eq!(lesson_number_from_file_name("Lesson.json"), None);
    assert_eq!(lesson_number_from_file_name("Lesson1.txt"), None);
  }

  #[test]
  fn numbers_wider_than_u64_resolve_and_list() {
    let (_td, store) = store_with(&[
      ("law/Lesson99999999999999999999999.json", r#"{"words":[]}"#),
      ("law/Lesson3.json", "{}"),
    ]);
    let doc = store.resolve("law-lesson-99999999999999999999999").expect("resolve");
    assert!(doc.path.ends_with("law/Lesson99999999999999999999999.json"));
    assert!(store.resolve("law-lesson-0099999999999999999999999").is_ok());

    let ids: Vec<String> = store.list_lessons("law").expect("list").into_iter().map(|l| l.id).collect();
    assert_eq!(ids, ["law-lesson-3", "law-lesson-99999999999999999999999"]);
  }
}
