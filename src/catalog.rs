//! Built-in topic catalog. Ids must match Content Store folder names.

use serde::Serialize;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Genre {
  pub id: &'static str,
  pub title: &'static str,
}

macro_rules! genre {
  ($id:expr, $title:expr) => {
    Genre { id: $id, title: $title }
  };
}

pub static GENRES: &[Genre] = &[
  genre!("word-intermediate", "単語初級~中級 (CEFR A2~B1)"),
  genre!("word-high-intermediate", "単語中上級 (CEFR B2)"),
  genre!("word-advanced", "単語上級 (CEFR C1)"),
  genre!("word-proficiency", "単語熟達 (CEFR C2)"),
  genre!("idioms-intermediate", "熟語初級~中級 (CEFR A2~B1)"),
  genre!("idioms-advanced", "熟語上級 (CEFR C1)"),
  genre!("idioms-high-intermediate", "熟語中上級 (CEFR B2)"),
  genre!("idioms-proficiency", "熟語熟達 (CEFR C2)"),
  genre!("business-entry", "ビジネス入門レベル"),
  genre!("business-intermediate", "ビジネス実践レベル"),
  genre!("business-global", "ビジネスグローバルレベル"),
  genre!("computer-science", "Computer Science & Technology"),
  genre!("medicine", "Medicine & Health"),
  genre!("economics-business", "Business & Economics"),
  genre!("environment", "Environmental Science & Sustainability"),
  genre!("law", "Law"),
  genre!("politics", "Politics"),
  genre!("engineering", "Engineering"),
];
