//! Multiple-choice quiz synthesis from a lesson's own word list.
//!
//! One question per eligible word, in lesson order. Each question blanks the
//! word out of its example sentence and offers it alongside two other words
//! from the same lesson. Distractors and choice order are random per call; the
//! RNG is a parameter so tests can pin it with a seeded `StdRng`.

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, instrument};

use crate::domain::{QuizQuestion, WordEntry};
use crate::error::LessonError;
use crate::util::{capitalize_first, replace_first};

pub const BLANK: &str = "____";
/// Answer plus distractors.
pub const CHOICES_PER_QUESTION: usize = 3;
const DISTRACTORS_PER_QUESTION: usize = CHOICES_PER_QUESTION - 1;

struct PoolItem<'a> {
  word: &'a str,
  example: &'a str,
}

#[instrument(level = "debug", skip_all, fields(words = words.len()))]
pub fn synthesize<R: Rng + ?Sized>(words: &[WordEntry], rng: &mut R) -> Result<Vec<QuizQuestion>, LessonError> {
  let pool: Vec<PoolItem> = words
    .iter()
    .filter_map(|w| {
      w.quiz_word().map(|word| PoolItem { word, example: w.example.as_deref().unwrap_or_default() })
    })
    .collect();

  if pool.is_empty() {
    return Err(LessonError::NoWords);
  }
  if pool.len() < CHOICES_PER_QUESTION {
    return Err(LessonError::InsufficientWords { available: pool.len() });
  }

  let questions = pool
    .iter()
    .map(|item| {
      let others = distinct_others(&pool, item.word);
      if others.len() < DISTRACTORS_PER_QUESTION {
        debug!(target: "quiz", word = %item.word, available = others.len(), "Duplicate words leave too few distractors");
      }
      let mut choices: Vec<String> = others
        .choose_multiple(rng, DISTRACTORS_PER_QUESTION)
        .map(|w| w.to_string())
        .collect();
      // Shuffle the distractors, then drop the answer into a uniform slot: together a uniform permutation.
      choices.shuffle(rng);
      let answer_index = rng.gen_range(0..=choices.len());
      choices.insert(answer_index, item.word.to_string());

      QuizQuestion {
        word: item.word.to_string(),
        sentence: item.example.to_string(),
        blank_sentence: blank_sentence(item.example, item.word),
        choices,
        answer_index,
      }
    })
    .collect();

  Ok(questions)
}

/// Pool words other than `correct`, deduplicated, first-seen order.
fn distinct_others<'a>(pool: &[PoolItem<'a>], correct: &str) -> Vec<&'a str> {
  let mut out: Vec<&'a str> = Vec::new();
  for item in pool {
    if item.word != correct && !out.contains(&item.word) {
      out.push(item.word);
    }
  }
  out
}

/// Blank the answer out of its example. Tried in order, first change wins:
/// exact word, capitalized word, otherwise prefix the marker.
pub fn blank_sentence(example: &str, word: &str) -> String {
  if example.is_empty() {
    return BLANK.to_string();
  }
  let capitalized = capitalize_first(word);
  let blanked = [word, capitalized.as_str()]
    .into_iter()
    .filter_map(|needle| replace_first(example, needle, BLANK))
    .find(|s| s != example);
  blanked.unwrap_or_else(|| format!("{BLANK} {example}"))
}
