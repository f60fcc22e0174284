//! Aggregates over the journal: symptom frequency, habit averages, the
//! overall health score and the advisories derived from them.
//!
//! Everything here is a pure function of the log slices passed in.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::log::{HabitLog, SymptomLog};

// ─── Period ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
  #[default]
  Week,
  Month,
  Quarter,
}

impl Period {
  pub fn days(self) -> u64 {
    match self {
      Self::Week => 7,
      Self::Month => 30,
      Self::Quarter => 90,
    }
  }

  /// First date included in the period ending on `today`.
  pub fn cutoff(self, today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(self.days())).unwrap_or(NaiveDate::MIN)
  }
}

/// Anything carrying a calendar date.
pub trait Dated {
  fn date(&self) -> NaiveDate;
}

impl Dated for SymptomLog {
  fn date(&self) -> NaiveDate { self.date }
}

impl Dated for HabitLog {
  fn date(&self) -> NaiveDate { self.date }
}

/// Entries dated within `period` of `today`, in input order.
pub fn window<T: Dated + Clone>(logs: &[T], period: Period, today: NaiveDate) -> Vec<T> {
  let cutoff = period.cutoff(today);
  logs.iter().filter(|l| l.date() >= cutoff).cloned().collect()
}

// ─── Frequency and averages ──────────────────────────────────────────────────

/// The five most logged symptom names with their counts. Equal counts keep
/// the order in which the names were first seen.
pub fn symptom_frequency(logs: &[SymptomLog]) -> Vec<(String, usize)> {
  let mut counts: Vec<(String, usize)> = Vec::new();
  for name in logs.iter().flat_map(|l| &l.symptoms) {
    match counts.iter_mut().find(|(n, _)| n == name) {
      Some((_, c)) => *c += 1,
      None => counts.push((name.clone(), 1)),
    }
  }
  counts.sort_by(|a, b| b.1.cmp(&a.1));
  counts.truncate(5);
  counts
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HabitAverages {
  pub water: u32,
  pub sleep: u32,
  pub steps: u32,
}

fn mean(values: impl Iterator<Item = u32>, len: usize) -> f64 {
  values.map(f64::from).sum::<f64>() / len as f64
}

/// Rounded mean of each habit field; all zeros for no logs.
pub fn average_habits(logs: &[HabitLog]) -> HabitAverages {
  if logs.is_empty() {
    return HabitAverages::default();
  }
  let n = logs.len();
  HabitAverages {
    water: mean(logs.iter().map(|l| l.water), n).round() as u32,
    sleep: mean(logs.iter().map(|l| l.sleep), n).round() as u32,
    steps: mean(logs.iter().map(|l| l.steps), n).round() as u32,
  }
}

/// Rounded mean mood score; zero for no logs.
pub fn average_mood(logs: &[SymptomLog]) -> u32 {
  if logs.is_empty() {
    return 0;
  }
  mean(logs.iter().map(|l| u32::from(l.mood.score())), logs.len()).round() as u32
}

// ─── Period advisories ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TrendInsight {
  FrequentSymptom(String),
  LowWater,
  LowSleep,
  LowActivity,
}

impl fmt::Display for TrendInsight {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FrequentSymptom(name) => write!(
        f,
        "\"{name}\" appears frequently. Consider consulting a healthcare provider."
      ),
      Self::LowWater => f.write_str(
        "Your water intake is below recommended. Try to drink more throughout the day.",
      ),
      Self::LowSleep => f.write_str("You may need more sleep. Aim for 7-9 hours per night."),
      Self::LowActivity => {
        f.write_str("Consider increasing your daily activity to reach 10,000 steps.")
      }
    }
  }
}

impl TrendInsight {
  pub fn is_warning(&self) -> bool { matches!(self, Self::FrequentSymptom(_)) }
}

/// Advisories for logs already narrowed to a period.
///
/// With no habit logs in the period the water, sleep and activity advisories
/// are skipped entirely instead of being judged on zero averages, which would
/// warn a user who simply has not logged habits yet.
pub fn trend_insights(symptoms: &[SymptomLog], habits: &[HabitLog]) -> Vec<TrendInsight> {
  let mut out = Vec::new();

  if let Some((name, count)) = symptom_frequency(symptoms).into_iter().next() {
    if count >= 3 {
      out.push(TrendInsight::FrequentSymptom(name));
    }
  }

  if !habits.is_empty() {
    let avg = average_habits(habits);
    if avg.water < 6 {
      out.push(TrendInsight::LowWater);
    }
    if avg.sleep < 7 {
      out.push(TrendInsight::LowSleep);
    }
    if avg.steps < 5000 {
      out.push(TrendInsight::LowActivity);
    }
  }
  out
}

// ─── Health score ────────────────────────────────────────────────────────────

const RECENT: usize = 7;

fn recent<T>(logs: &[T]) -> &[T] { &logs[logs.len().saturating_sub(RECENT)..] }

/// Overall 0–100 score from the most recent week of entries.
///
/// Base 50, plus up to 30 for mood, up to 20 each for water and sleep
/// against an 8-unit target, plus up to 20 for logging consistency. The sum
/// is capped at 100 and rounded.
pub fn health_score(symptoms: &[SymptomLog], habits: &[HabitLog]) -> u32 {
  let mut score = 50.0;

  let moods = recent(symptoms);
  if !moods.is_empty() {
    let avg = mean(moods.iter().map(|l| u32::from(l.mood.score())), moods.len());
    score += avg / 3.0 * 30.0;
  }

  let habits_recent = recent(habits);
  if !habits_recent.is_empty() {
    let n = habits_recent.len();
    let water = mean(habits_recent.iter().map(|l| l.water), n);
    let sleep = mean(habits_recent.iter().map(|l| l.sleep), n);
    score += (water / 8.0 * 20.0).min(20.0);
    score += (sleep / 8.0 * 20.0).min(20.0);
  }

  let consistent_days = symptoms.len().min(habits.len()).min(RECENT);
  score += consistent_days as f64 / RECENT as f64 * 20.0;

  score.min(100.0).round() as u32
}

// ─── Health insights ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum InsightKind {
  Positive,
  Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthInsight {
  pub kind:           InsightKind,
  pub title:          &'static str,
  pub description:    String,
  pub recommendation: &'static str,
  /// Fixed per insight, in percent.
  pub confidence:     u8,
}

/// Insights on mood, hydration and sleep over the latest week of entries.
pub fn health_insights(symptoms: &[SymptomLog], habits: &[HabitLog]) -> Vec<HealthInsight> {
  let mut out = Vec::new();

  let moods = recent(symptoms);
  if !moods.is_empty() {
    let avg = mean(moods.iter().map(|l| u32::from(l.mood.score())), moods.len());
    out.push(if avg >= 2.5 {
      HealthInsight {
        kind:           InsightKind::Positive,
        title:          "Positive Mood Trend",
        description:    format!(
          "Your average mood score is {avg:.1}/3, indicating good emotional wellbeing."
        ),
        recommendation: "Keep up the great work! Continue your current wellness practices.",
        confidence:     85,
      }
    } else {
      HealthInsight {
        kind:           InsightKind::Warning,
        title:          "Mood Attention Needed",
        description:    format!(
          "Your average mood score is {avg:.1}/3, which may indicate stress or fatigue."
        ),
        recommendation: "Consider incorporating more relaxation techniques and ensure \
                         adequate sleep.",
        confidence:     78,
      }
    });
  }

  let recent_habits = recent(habits);
  if !recent_habits.is_empty() {
    let n = recent_habits.len();
    let water = mean(recent_habits.iter().map(|l| l.water), n);
    let sleep = mean(recent_habits.iter().map(|l| l.sleep), n);

    if water >= 8.0 {
      out.push(HealthInsight {
        kind:           InsightKind::Positive,
        title:          "Excellent Hydration",
        description:    format!("You're averaging {water:.1} glasses of water daily."),
        recommendation: "Your hydration habits are excellent. This supports optimal body \
                         function.",
        confidence:     92,
      });
    } else if water < 6.0 {
      out.push(HealthInsight {
        kind:           InsightKind::Warning,
        title:          "Hydration Improvement Needed",
        description:    format!("Your average water intake is {water:.1} glasses daily."),
        recommendation: "Aim for 8+ glasses daily. Set hourly reminders to drink water.",
        confidence:     88,
      });
    }

    if (7.0..=9.0).contains(&sleep) {
      out.push(HealthInsight {
        kind:           InsightKind::Positive,
        title:          "Optimal Sleep Pattern",
        description:    format!(
          "Your average sleep duration is {sleep:.1} hours, within the ideal range."
        ),
        recommendation: "Maintain this excellent sleep schedule for continued health \
                         benefits.",
        confidence:     90,
      });
    }
  }
  out
}
