//! The three append-only daily logs.
//!
//! Entries are immutable once recorded and are only ever removed by a bulk
//! clear. The serialised form is camelCase JSON without a version field.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Id for a new entry: the creation time in milliseconds, as a string.
///
/// Two entries created in the same millisecond get the same id; callers
/// assume that does not happen.
pub fn timestamp_id() -> String { Utc::now().timestamp_millis().to_string() }

// ─── Mood ────────────────────────────────────────────────────────────────────

/// Ordinal mood score 1–3, stored as the bare integer.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
  strum::Display,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Mood {
  Poor,
  Fair,
  #[default]
  Good,
}

impl Mood {
  pub fn score(self) -> u8 {
    match self {
      Self::Poor => 1,
      Self::Fair => 2,
      Self::Good => 3,
    }
  }
}

impl From<Mood> for u8 {
  fn from(mood: Mood) -> Self { mood.score() }
}

impl TryFrom<u8> for Mood {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(Self::Poor),
      2 => Ok(Self::Fair),
      3 => Ok(Self::Good),
      other => Err(format!("mood must be 1, 2 or 3, got {other}")),
    }
  }
}

// ─── Symptom log ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomLog {
  pub id:       String,
  pub date:     NaiveDate,
  pub symptoms: Vec<String>,
  pub mood:     Mood,
  pub notes:    String,
}

/// Input to [`crate::journal::Journal::add_symptom_log`]; the id is assigned
/// by the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSymptomLog {
  pub date:     NaiveDate,
  pub symptoms: Vec<String>,
  pub mood:     Mood,
  pub notes:    String,
}

impl NewSymptomLog {
  pub(crate) fn into_log(self, id: String) -> SymptomLog {
    SymptomLog {
      id,
      date: self.date,
      symptoms: self.symptoms,
      mood: self.mood,
      notes: self.notes,
    }
  }
}

// ─── Habit log ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
  pub id:         String,
  pub date:       NaiveDate,
  /// Glasses of water.
  pub water:      u32,
  /// Hours slept.
  pub sleep:      u32,
  pub steps:      u32,
  pub medication: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabitLog {
  pub date:       NaiveDate,
  pub water:      u32,
  pub sleep:      u32,
  pub steps:      u32,
  pub medication: bool,
}

impl NewHabitLog {
  pub(crate) fn into_log(self, id: String) -> HabitLog {
    HabitLog {
      id,
      date: self.date,
      water: self.water,
      sleep: self.sleep,
      steps: self.steps,
      medication: self.medication,
    }
  }
}

// ─── Quiz result ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
  pub id:              String,
  pub date:            NaiveDate,
  pub score:           u32,
  pub total_questions: u32,
  pub category:        String,
}

impl QuizResult {
  /// Rounded percentage; zero for an empty quiz.
  pub fn percentage(&self) -> u32 {
    if self.total_questions == 0 {
      return 0;
    }
    (200 * self.score + self.total_questions) / (2 * self.total_questions)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizResult {
  pub date:            NaiveDate,
  pub score:           u32,
  pub total_questions: u32,
  pub category:        String,
}

impl NewQuizResult {
  pub(crate) fn into_result(self, id: String) -> QuizResult {
    QuizResult {
      id,
      date: self.date,
      score: self.score,
      total_questions: self.total_questions,
      category: self.category,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mood_serialises_as_integer() {
    let log = SymptomLog {
      id:       "1700000000000".into(),
      date:     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
      symptoms: vec!["Headache".into()],
      mood:     Mood::Fair,
      notes:    String::new(),
    };
    let json = serde_json::to_value(&log).unwrap();
    assert_eq!(json["mood"], 2);
    assert_eq!(json["date"], "2024-03-01");
  }

  #[test]
  fn mood_out_of_range_is_rejected() {
    let raw = r#"{"id":"1","date":"2024-03-01","symptoms":[],"mood":7,"notes":""}"#;
    assert!(serde_json::from_str::<SymptomLog>(raw).is_err());
  }

  #[test]
  fn quiz_result_uses_camel_case() {
    let raw = r#"{"id":"1","date":"2024-03-01","score":6,"totalQuestions":8,"category":"Health Awareness"}"#;
    let result: QuizResult = serde_json::from_str(raw).unwrap();
    assert_eq!(result.total_questions, 8);
    assert_eq!(result.percentage(), 75);
  }

  #[test]
  fn timestamp_ids_are_numeric() {
    assert!(timestamp_id().parse::<i64>().is_ok());
  }
}
