//! [`Journal`]: the local data store for symptom logs, habit logs and quiz
//! results.
//!
//! Each list is held in memory and mirrored to the backend as one JSON array
//! under its own key. Every append rewrites the whole list. The three lists
//! are independent: there is no transaction spanning them, and a corrupt
//! list on load only empties that list.

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  log::{
    HabitLog, NewHabitLog, NewQuizResult, NewSymptomLog, QuizResult, SymptomLog,
    timestamp_id,
  },
  storage::{HABIT_LOGS_KEY, KeyValueStore, QUIZ_RESULTS_KEY, SYMPTOM_LOGS_KEY},
};

/// Read a whole list from `storage`.
///
/// A missing key is an empty list. A value that fails to parse is logged and
/// treated as empty; no partial recovery is attempted.
pub(crate) async fn read_list<S, T>(storage: &S, key: &str) -> Result<Vec<T>>
where
  S: KeyValueStore,
  T: DeserializeOwned,
{
  let Some(raw) = storage.get_item(key).await.map_err(Error::storage)? else {
    return Ok(Vec::new());
  };
  match serde_json::from_str(&raw) {
    Ok(list) => Ok(list),
    Err(err) => {
      warn!(key, error = %err, "discarding unreadable stored list");
      Ok(Vec::new())
    }
  }
}

/// Serialise `list` and replace whatever is stored under `key`.
pub(crate) async fn write_list<S, T>(storage: &S, key: &str, list: &[T]) -> Result<()>
where
  S: KeyValueStore,
  T: Serialize,
{
  let raw = serde_json::to_string(list)?;
  storage.set_item(key, raw).await.map_err(Error::storage)?;
  debug!(key, len = list.len(), "persisted list");
  Ok(())
}

// ─── Today ───────────────────────────────────────────────────────────────────

/// The first symptom and habit entries dated on a given day, if any.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodaysLogs<'a> {
  pub symptom: Option<&'a SymptomLog>,
  pub habit:   Option<&'a HabitLog>,
}

// ─── Journal ─────────────────────────────────────────────────────────────────

/// In-memory view of the three logs, backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct Journal<S> {
  storage:      S,
  symptom_logs: Vec<SymptomLog>,
  habit_logs:   Vec<HabitLog>,
  quiz_results: Vec<QuizResult>,
}

impl<S: KeyValueStore> Journal<S> {
  /// Load all three lists from `storage`.
  ///
  /// Backend failures are returned; unparseable lists are not (see
  /// [`read_list`]).
  pub async fn load(storage: S) -> Result<Self> {
    let symptom_logs = read_list(&storage, SYMPTOM_LOGS_KEY).await?;
    let habit_logs = read_list(&storage, HABIT_LOGS_KEY).await?;
    let quiz_results = read_list(&storage, QUIZ_RESULTS_KEY).await?;

    debug!(
      symptom_logs = symptom_logs.len(),
      habit_logs = habit_logs.len(),
      quiz_results = quiz_results.len(),
      "journal loaded"
    );

    Ok(Self { storage, symptom_logs, habit_logs, quiz_results })
  }

  pub fn symptom_logs(&self) -> &[SymptomLog] { &self.symptom_logs }

  pub fn habit_logs(&self) -> &[HabitLog] { &self.habit_logs }

  pub fn quiz_results(&self) -> &[QuizResult] { &self.quiz_results }

  // ── Appends ─────────────────────────────────────────────────────────────

  /// Append a symptom entry and persist the whole list.
  ///
  /// The entry stays in memory even if the write fails.
  pub async fn add_symptom_log(&mut self, input: NewSymptomLog) -> Result<SymptomLog> {
    let log = input.into_log(timestamp_id());
    self.symptom_logs.push(log.clone());
    write_list(&self.storage, SYMPTOM_LOGS_KEY, &self.symptom_logs).await?;
    Ok(log)
  }

  /// Append a habit entry and persist the whole list.
  pub async fn add_habit_log(&mut self, input: NewHabitLog) -> Result<HabitLog> {
    let log = input.into_log(timestamp_id());
    self.habit_logs.push(log.clone());
    write_list(&self.storage, HABIT_LOGS_KEY, &self.habit_logs).await?;
    Ok(log)
  }

  /// Append a quiz result and persist the whole list.
  pub async fn add_quiz_result(&mut self, input: NewQuizResult) -> Result<QuizResult> {
    let result = input.into_result(timestamp_id());
    self.quiz_results.push(result.clone());
    write_list(&self.storage, QUIZ_RESULTS_KEY, &self.quiz_results).await?;
    Ok(result)
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  pub fn todays_logs(&self, today: NaiveDate) -> TodaysLogs<'_> {
    TodaysLogs {
      symptom: self.symptom_logs.iter().find(|l| l.date == today),
      habit:   self.habit_logs.iter().find(|l| l.date == today),
    }
  }

  // ── Bulk clear ──────────────────────────────────────────────────────────

  /// Empty all three lists and remove their keys from storage.
  pub async fn clear_all(&mut self) -> Result<()> {
    self.symptom_logs.clear();
    self.habit_logs.clear();
    self.quiz_results.clear();

    for key in [SYMPTOM_LOGS_KEY, HABIT_LOGS_KEY, QUIZ_RESULTS_KEY] {
      self.storage.remove_item(key).await.map_err(Error::storage)?;
    }
    debug!("journal cleared");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{log::Mood, storage::MemoryStorage};

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, d).unwrap() }

  fn symptoms(d: u32, names: &[&str]) -> NewSymptomLog {
    NewSymptomLog {
      date:     day(d),
      symptoms: names.iter().map(|s| (*s).to_owned()).collect(),
      mood:     Mood::Fair,
      notes:    "tired".into(),
    }
  }

  fn habits(d: u32, water: u32) -> NewHabitLog {
    NewHabitLog { date: day(d), water, sleep: 7, steps: 4200, medication: true }
  }

  #[tokio::test]
  async fn empty_storage_loads_empty() {
    let journal = Journal::load(MemoryStorage::new()).await.unwrap();
    assert!(journal.symptom_logs().is_empty());
    assert!(journal.habit_logs().is_empty());
    assert!(journal.quiz_results().is_empty());
  }

  #[tokio::test]
  async fn round_trip_through_storage() {
    let storage = MemoryStorage::new();
    let mut journal = Journal::load(storage.clone()).await.unwrap();

    journal.add_symptom_log(symptoms(1, &["Headache", "Cough"])).await.unwrap();
    journal.add_symptom_log(symptoms(2, &[])).await.unwrap();
    journal.add_habit_log(habits(1, 8)).await.unwrap();

    let reloaded = Journal::load(storage).await.unwrap();
    assert_eq!(reloaded.symptom_logs(), journal.symptom_logs());
    assert_eq!(reloaded.habit_logs(), journal.habit_logs());
    assert_eq!(reloaded.symptom_logs()[0].symptoms, vec!["Headache", "Cough"]);
  }

  #[tokio::test]
  async fn corrupt_list_defaults_to_empty_alone() {
    let storage = MemoryStorage::new();
    {
      let mut journal = Journal::load(storage.clone()).await.unwrap();
      journal.add_symptom_log(symptoms(1, &["Fever"])).await.unwrap();
      journal.add_habit_log(habits(1, 3)).await.unwrap();
    }
    storage.set_item(HABIT_LOGS_KEY, "{not json".into()).await.unwrap();

    let journal = Journal::load(storage).await.unwrap();
    assert_eq!(journal.symptom_logs().len(), 1);
    assert!(journal.habit_logs().is_empty());
  }

  #[tokio::test]
  async fn todays_logs_finds_first_entry_for_the_day() {
    let mut journal = Journal::load(MemoryStorage::new()).await.unwrap();
    journal.add_habit_log(habits(3, 5)).await.unwrap();
    journal.add_habit_log(habits(4, 9)).await.unwrap();

    let today = journal.todays_logs(day(4));
    assert!(today.symptom.is_none());
    assert_eq!(today.habit.map(|h| h.water), Some(9));
    assert!(journal.todays_logs(day(5)).habit.is_none());
  }

  #[tokio::test]
  async fn clear_all_empties_and_removes_keys() {
    let storage = MemoryStorage::new();
    let mut journal = Journal::load(storage.clone()).await.unwrap();
    journal.add_symptom_log(symptoms(1, &["Fever"])).await.unwrap();
    journal.add_habit_log(habits(1, 8)).await.unwrap();
    journal
      .add_quiz_result(NewQuizResult {
        date:            day(1),
        score:           5,
        total_questions: 8,
        category:        "Health Awareness".into(),
      })
      .await
      .unwrap();

    journal.clear_all().await.unwrap();
    assert!(journal.symptom_logs().is_empty());
    assert!(storage.is_empty());

    let reloaded = Journal::load(storage).await.unwrap();
    assert!(reloaded.symptom_logs().is_empty());
    assert!(reloaded.habit_logs().is_empty());
    assert!(reloaded.quiz_results().is_empty());
  }
}
