//! HTTP request/response structs (serde ready).
//! Field names match what the web frontend already reads.

use serde::{Deserialize, Serialize};

use crate::catalog::Genre;
use crate::domain::{LessonSummary, QuizQuestion};

/// Error body, FastAPI-style so the frontend's existing error handling keeps working.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorOut {
    pub detail: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

//
// Auth
//

/// `password` may be sent too; it is ignored.
#[derive(Deserialize)]
pub struct LoginIn {
    #[serde(default)]
    pub username: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOut {
    pub username: String,
    pub level: String,
    pub total_words: u32,
}

#[derive(Serialize)]
pub struct LoginOut {
    pub token: String,
    pub user: UserOut,
}

#[derive(Debug, Deserialize)]
pub struct MeQuery {
    #[serde(default)]
    pub token: String,
}

#[derive(Serialize)]
pub struct MeOut {
    pub user: UserOut,
}

//
// Catalog + lessons
//

#[derive(Serialize)]
pub struct GenresOut {
    pub genres: &'static [Genre],
}

#[derive(Serialize)]
pub struct LessonsOut {
    pub lessons: Vec<LessonSummary>,
}

#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub lesson_id: String,
    pub questions: Vec<QuizQuestion>,
}

//
// Chat
//

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    pub message: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_specialty")]
    pub specialty: String,
}

fn default_level() -> String {
    "B1".into()
}

fn default_specialty() -> String {
    "everyday conversation".into()
}

#[derive(Serialize)]
pub struct ChatOut {
    pub reply: String,
}
