//! Health goals and the [`GoalBook`] that persists them.
//!
//! Goals live under their own storage key, apart from the journal, and unlike
//! log entries they can be updated and deleted.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Result,
  journal::{read_list, write_list},
  log::timestamp_id,
  storage::{GOALS_KEY, KeyValueStore},
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GoalCategory {
  Fitness,
  Nutrition,
  Mental,
  Sleep,
  Habits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub category:    GoalCategory,
  pub target:      f64,
  pub current:     f64,
  pub unit:        String,
  pub deadline:    NaiveDate,
  pub completed:   bool,
  pub created_at:  DateTime<Utc>,
}

impl Goal {
  /// Progress towards the target as a percentage, capped at 100.
  pub fn progress_percent(&self) -> f64 {
    if self.target <= 0.0 {
      return 0.0;
    }
    (self.current / self.target * 100.0).min(100.0)
  }
}

/// Input to [`GoalBook::add_goal`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
  pub title:       String,
  pub description: String,
  pub category:    GoalCategory,
  pub target:      f64,
  pub unit:        String,
  pub deadline:    NaiveDate,
}

impl NewGoal {
  /// An empty habits goal due 30 days after `today`.
  pub fn blank(today: NaiveDate) -> Self {
    Self {
      title:       String::new(),
      description: String::new(),
      category:    GoalCategory::Habits,
      target:      0.0,
      unit:        String::new(),
      deadline:    today.checked_add_days(Days::new(30)).unwrap_or(today),
    }
  }

  /// Pre-fill a goal from a template, due 30 days after `today`.
  pub fn from_template(template: &GoalTemplate, today: NaiveDate) -> Self {
    Self {
      title: template.title.to_owned(),
      category: template.category,
      target: template.target,
      unit: template.unit.to_owned(),
      ..Self::blank(today)
    }
  }

  /// Whether the required fields are filled in.
  pub fn is_complete(&self) -> bool {
    !self.title.trim().is_empty() && self.target > 0.0
  }
}

// ─── Templates ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct GoalTemplate {
  pub title:    &'static str,
  pub category: GoalCategory,
  pub target:   f64,
  pub unit:     &'static str,
}

pub const GOAL_TEMPLATES: &[GoalTemplate] = &[
  GoalTemplate {
    title:    "Drink 8 glasses of water daily",
    category: GoalCategory::Nutrition,
    target:   8.0,
    unit:     "glasses",
  },
  GoalTemplate {
    title:    "Walk 10,000 steps daily",
    category: GoalCategory::Fitness,
    target:   10_000.0,
    unit:     "steps",
  },
  GoalTemplate {
    title:    "Sleep 8 hours nightly",
    category: GoalCategory::Sleep,
    target:   8.0,
    unit:     "hours",
  },
  GoalTemplate {
    title:    "Meditate 10 minutes daily",
    category: GoalCategory::Mental,
    target:   10.0,
    unit:     "minutes",
  },
  GoalTemplate {
    title:    "Exercise 5 times per week",
    category: GoalCategory::Fitness,
    target:   5.0,
    unit:     "sessions",
  },
];

// ─── GoalBook ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GoalStats {
  pub completed: usize,
  pub total:     usize,
}

/// User goals, persisted as one list under [`GOALS_KEY`].
#[derive(Debug)]
pub struct GoalBook<S> {
  storage: S,
  goals:   Vec<Goal>,
}

impl<S: KeyValueStore> GoalBook<S> {
  /// Load goals; an unreadable stored list is logged and treated as empty.
  pub async fn load(storage: S) -> Result<Self> {
    let goals = read_list(&storage, GOALS_KEY).await?;
    Ok(Self { storage, goals })
  }

  pub fn goals(&self) -> &[Goal] { &self.goals }

  pub fn get(&self, id: &str) -> Option<&Goal> { self.goals.iter().find(|g| g.id == id) }

  pub fn stats(&self) -> GoalStats {
    GoalStats {
      completed: self.goals.iter().filter(|g| g.completed).count(),
      total:     self.goals.len(),
    }
  }

  /// Add a goal. Incomplete input is ignored and yields `None`.
  pub async fn add_goal(&mut self, input: NewGoal) -> Result<Option<Goal>> {
    if !input.is_complete() {
      debug!(title = %input.title, "ignoring incomplete goal");
      return Ok(None);
    }

    let goal = Goal {
      id:          timestamp_id(),
      title:       input.title,
      description: input.description,
      category:    input.category,
      target:      input.target,
      current:     0.0,
      unit:        input.unit,
      deadline:    input.deadline,
      completed:   false,
      created_at:  Utc::now(),
    };
    self.goals.push(goal.clone());
    self.save().await?;
    Ok(Some(goal))
  }

  /// Set a goal's progress; it is completed once `current` reaches the
  /// target. Unknown ids yield `None` and change nothing.
  pub async fn update_progress(&mut self, id: &str, current: f64) -> Result<Option<Goal>> {
    let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
      return Ok(None);
    };
    goal.current = current;
    goal.completed = current >= goal.target;
    let updated = goal.clone();
    self.save().await?;
    Ok(Some(updated))
  }

  /// Remove a goal; returns whether anything was removed.
  pub async fn delete_goal(&mut self, id: &str) -> Result<bool> {
    let before = self.goals.len();
    self.goals.retain(|g| g.id != id);
    if self.goals.len() == before {
      return Ok(false);
    }
    self.save().await?;
    Ok(true)
  }

  async fn save(&self) -> Result<()> { write_list(&self.storage, GOALS_KEY, &self.goals).await }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::storage::MemoryStorage;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, 10).unwrap() }

  #[test]
  fn template_deadline_is_thirty_days_out() {
    let goal = NewGoal::from_template(&GOAL_TEMPLATES[1], today());
    assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2024, 2, 9).unwrap());
    assert_eq!(goal.category, GoalCategory::Fitness);
    assert_eq!(goal.unit, "steps");
  }

  #[tokio::test]
  async fn incomplete_goal_is_ignored() {
    let storage = MemoryStorage::new();
    let mut book = GoalBook::load(storage.clone()).await.unwrap();
    let mut input = NewGoal::from_template(&GOAL_TEMPLATES[0], today());
    input.title = "  ".into();
    assert!(book.add_goal(input).await.unwrap().is_none());

    let mut input = NewGoal::from_template(&GOAL_TEMPLATES[0], today());
    input.target = 0.0;
    assert!(book.add_goal(input).await.unwrap().is_none());

    assert!(book.goals().is_empty());
    assert!(storage.is_empty());
  }

  #[tokio::test]
  async fn progress_completes_goal_and_persists() {
    let storage = MemoryStorage::new();
    let mut book = GoalBook::load(storage.clone()).await.unwrap();
    let goal = book
      .add_goal(NewGoal::from_template(&GOAL_TEMPLATES[2], today()))
      .await
      .unwrap()
      .unwrap();

    let half = book.update_progress(&goal.id, 4.0).await.unwrap().unwrap();
    assert!(!half.completed);
    assert_eq!(half.progress_percent(), 50.0);

    let done = book.update_progress(&goal.id, 9.0).await.unwrap().unwrap();
    assert!(done.completed);
    assert_eq!(done.progress_percent(), 100.0);

    let reloaded = GoalBook::load(storage).await.unwrap();
    assert_eq!(reloaded.stats(), GoalStats { completed: 1, total: 1 });
    assert_eq!(reloaded.get(&goal.id).unwrap().current, 9.0);
  }

  #[tokio::test]
  async fn unknown_ids_change_nothing() {
    let mut book = GoalBook::load(MemoryStorage::new()).await.unwrap();
    assert!(book.update_progress("nope", 1.0).await.unwrap().is_none());
    assert!(!book.delete_goal("nope").await.unwrap());
  }

  #[tokio::test]
  async fn delete_removes_goal() {
    let storage = MemoryStorage::new();
    let mut book = GoalBook::load(storage.clone()).await.unwrap();
    let goal = book
      .add_goal(NewGoal::from_template(&GOAL_TEMPLATES[3], today()))
      .await
      .unwrap()
      .unwrap();
    assert!(book.delete_goal(&goal.id).await.unwrap());

    let reloaded = GoalBook::load(storage).await.unwrap();
    assert!(reloaded.goals().is_empty());
  }
}
