//! Integration tests for `SqliteStorage` against an in-memory database.

use chrono::NaiveDate;
use symptotrack_core::{
  goal::{GOAL_TEMPLATES, GoalBook, NewGoal},
  journal::Journal,
  log::{Mood, NewHabitLog, NewSymptomLog},
  storage::{GOALS_KEY, HABIT_LOGS_KEY, KeyValueStore, SYMPTOM_LOGS_KEY},
};

use crate::SqliteStorage;

async fn store() -> SqliteStorage {
  SqliteStorage::open_in_memory()
    .await
    .expect("in-memory store")
}

fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 7, d).unwrap() }

// ─── Raw key-value access ────────────────────────────────────────────────────

#[tokio::test]
async fn missing_key_is_none() {
  let s = store().await;
  assert_eq!(s.get_item("absent").await.unwrap(), None);
}

#[tokio::test]
async fn set_replaces_previous_value() {
  let s = store().await;
  s.set_item("k", "[1]".into()).await.unwrap();
  s.set_item("k", "[1,2]".into()).await.unwrap();

  assert_eq!(s.get_item("k").await.unwrap().as_deref(), Some("[1,2]"));
  assert_eq!(s.entries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn remove_is_idempotent() {
  let s = store().await;
  s.set_item("k", "v".into()).await.unwrap();
  s.remove_item("k").await.unwrap();
  s.remove_item("k").await.unwrap();
  assert_eq!(s.get_item("k").await.unwrap(), None);
}

#[tokio::test]
async fn entries_are_sorted_by_key() {
  let s = store().await;
  s.set_item("b", "2".into()).await.unwrap();
  s.set_item("a", "1".into()).await.unwrap();

  let keys: Vec<_> = s.entries().await.unwrap().into_iter().map(|(k, _)| k).collect();
  assert_eq!(keys, vec!["a", "b"]);
}

// ─── Journal over SQLite ─────────────────────────────────────────────────────

#[tokio::test]
async fn journal_round_trip() {
  let s = store().await;
  let mut journal = Journal::load(s.clone()).await.unwrap();
  journal
    .add_symptom_log(NewSymptomLog {
      date:     day(1),
      symptoms: vec!["Fever".into(), "Chills".into()],
      mood:     Mood::Poor,
      notes:    "rough night".into(),
    })
    .await
    .unwrap();
  journal
    .add_habit_log(NewHabitLog {
      date:       day(1),
      water:      6,
      sleep:      9,
      steps:      1200,
      medication: true,
    })
    .await
    .unwrap();

  let reloaded = Journal::load(s.clone()).await.unwrap();
  assert_eq!(reloaded.symptom_logs(), journal.symptom_logs());
  assert_eq!(reloaded.habit_logs(), journal.habit_logs());

  let raw = s.get_item(SYMPTOM_LOGS_KEY).await.unwrap().unwrap();
  let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
  assert_eq!(json[0]["mood"], 1);
  assert_eq!(json[0]["date"], "2024-07-01");
}

#[tokio::test]
async fn corrupt_value_loads_as_empty_list() {
  let s = store().await;
  s.set_item(HABIT_LOGS_KEY, "not json at all".into()).await.unwrap();

  let journal = Journal::load(s).await.unwrap();
  assert!(journal.habit_logs().is_empty());
}

#[tokio::test]
async fn clear_all_removes_rows() {
  let s = store().await;
  let mut journal = Journal::load(s.clone()).await.unwrap();
  journal
    .add_symptom_log(NewSymptomLog {
      date:     day(2),
      symptoms: vec![],
      mood:     Mood::Good,
      notes:    String::new(),
    })
    .await
    .unwrap();

  journal.clear_all().await.unwrap();
  assert!(s.entries().await.unwrap().is_empty());
}

// ─── Goals over SQLite ───────────────────────────────────────────────────────

#[tokio::test]
async fn goals_persist_separately_from_journal() {
  let s = store().await;
  let mut book = GoalBook::load(s.clone()).await.unwrap();
  let goal = book
    .add_goal(NewGoal::from_template(&GOAL_TEMPLATES[0], day(1)))
    .await
    .unwrap()
    .unwrap();
  book.update_progress(&goal.id, 8.0).await.unwrap();

  let mut journal = Journal::load(s.clone()).await.unwrap();
  journal.clear_all().await.unwrap();

  assert!(s.get_item(GOALS_KEY).await.unwrap().is_some());
  let reloaded = GoalBook::load(s).await.unwrap();
  assert!(reloaded.get(&goal.id).unwrap().completed);
}
