//! Achievements and experience levels derived from the journal.

use serde::Serialize;

use crate::log::{HabitLog, SymptomLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
  Common,
  Rare,
  Epic,
  Legendary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
  pub id:           &'static str,
  pub title:        &'static str,
  pub description:  &'static str,
  pub points:       u32,
  pub rarity:       Rarity,
  pub progress:     usize,
  pub max_progress: usize,
}

impl Achievement {
  pub fn unlocked(&self) -> bool { self.progress >= self.max_progress }
}

struct Rule {
  id:          &'static str,
  title:       &'static str,
  description: &'static str,
  points:      u32,
  rarity:      Rarity,
  max:         usize,
}

impl Rule {
  fn evaluate(&self, count: usize) -> Achievement {
    Achievement {
      id:           self.id,
      title:        self.title,
      description:  self.description,
      points:       self.points,
      rarity:       self.rarity,
      progress:     count.min(self.max),
      max_progress: self.max,
    }
  }
}

const FIRST_LOG: Rule = Rule {
  id:          "first_log",
  title:       "First Steps",
  description: "Log your first symptom entry",
  points:      50,
  rarity:      Rarity::Common,
  max:         1,
};

const WEEK_STREAK: Rule = Rule {
  id:          "week_streak",
  title:       "Week Warrior",
  description: "Log symptoms for 7 days",
  points:      200,
  rarity:      Rarity::Rare,
  max:         7,
};

const HYDRATION_MASTER: Rule = Rule {
  id:          "hydration_master",
  title:       "Hydration Master",
  description: "Drink 8+ glasses of water for 5 days",
  points:      150,
  rarity:      Rarity::Rare,
  max:         5,
};

const SLEEP_CHAMPION: Rule = Rule {
  id:          "sleep_champion",
  title:       "Sleep Champion",
  description: "Get 8+ hours of sleep for 7 nights",
  points:      300,
  rarity:      Rarity::Epic,
  max:         7,
};

const PERFECT_MONTH: Rule = Rule {
  id:          "perfect_month",
  title:       "Perfect Month",
  description: "Complete all daily logs for 30 days",
  points:      1000,
  rarity:      Rarity::Legendary,
  max:         30,
};

/// Evaluate every achievement against the full logs.
///
/// Progress counts entries, not distinct or consecutive days.
pub fn achievements(symptoms: &[SymptomLog], habits: &[HabitLog]) -> Vec<Achievement> {
  let hydrated_days = habits.iter().filter(|h| h.water >= 8).count();
  let rested_nights = habits.iter().filter(|h| h.sleep >= 8).count();

  vec![
    FIRST_LOG.evaluate(symptoms.len()),
    WEEK_STREAK.evaluate(symptoms.len()),
    HYDRATION_MASTER.evaluate(hydrated_days),
    SLEEP_CHAMPION.evaluate(rested_nights),
    PERFECT_MONTH.evaluate(symptoms.len().min(habits.len())),
  ]
}

/// Sum of points over unlocked achievements.
pub fn total_xp(achievements: &[Achievement]) -> u32 {
  achievements.iter().filter(|a| a.unlocked()).map(|a| a.points).sum()
}

// ─── Levels ──────────────────────────────────────────────────────────────────

const FIRST_LEVEL_XP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
  pub level:      u32,
  /// XP earned inside the current level.
  pub current_xp: u32,
  pub xp_to_next: u32,
}

impl Level {
  /// Level reached with `xp` total experience. Level 2 costs 100 XP and each
  /// later level costs 20% more than the previous one, rounded down.
  pub fn from_xp(xp: u32) -> Self {
    let mut level = 1;
    let mut required = FIRST_LEVEL_XP;
    let mut spent = 0;
    while spent + required <= xp {
      spent += required;
      level += 1;
      required = required * 6 / 5;
    }
    Self { level, current_xp: xp - spent, xp_to_next: required - (xp - spent) }
  }

  pub fn title(&self) -> &'static str {
    match self.level {
      50.. => "Health Guru",
      40.. => "Wellness Master",
      30.. => "Health Expert",
      20.. => "Wellness Warrior",
      15.. => "Health Enthusiast",
      10.. => "Wellness Seeker",
      5.. => "Health Explorer",
      _ => "Health Novice",
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::log::Mood;

  fn symptom_logs(n: u32) -> Vec<SymptomLog> {
    (0..n)
      .map(|i| SymptomLog {
        id:       i.to_string(),
        date:     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        symptoms: Vec::new(),
        mood:     Mood::Good,
        notes:    String::new(),
      })
      .collect()
  }

  fn habit_logs(n: u32, water: u32, sleep: u32) -> Vec<HabitLog> {
    (0..n)
      .map(|i| HabitLog {
        id: i.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        water,
        sleep,
        steps: 0,
        medication: false,
      })
      .collect()
  }

  #[test]
  fn nothing_unlocked_without_logs() {
    let list = achievements(&[], &[]);
    assert_eq!(list.len(), 5);
    assert!(list.iter().all(|a| !a.unlocked() && a.progress == 0));
    assert_eq!(total_xp(&list), 0);
  }

  #[test]
  fn progress_is_capped_and_unlocks() {
    let list = achievements(&symptom_logs(8), &habit_logs(5, 9, 6));
    let by_id = |id| list.iter().find(|a| a.id == id).unwrap();
    assert!(by_id("first_log").unlocked());
    assert_eq!(by_id("week_streak").progress, 7);
    assert!(by_id("hydration_master").unlocked());
    assert_eq!(by_id("sleep_champion").progress, 0);
    assert_eq!(by_id("perfect_month").progress, 5);
    assert_eq!(total_xp(&list), 50 + 200 + 150);
  }

  #[test]
  fn levels_grow_by_twenty_percent() {
    assert_eq!(Level::from_xp(0), Level { level: 1, current_xp: 0, xp_to_next: 100 });
    assert_eq!(Level::from_xp(100), Level { level: 2, current_xp: 0, xp_to_next: 120 });
    // 100 + 120 + 144 = 364 reaches level 4; the next step costs 172.
    assert_eq!(Level::from_xp(400), Level { level: 4, current_xp: 36, xp_to_next: 136 });
  }

  #[test]
  fn every_achievement_reaches_explorer() {
    let list = achievements(&symptom_logs(30), &habit_logs(30, 8, 8));
    let xp = total_xp(&list);
    assert_eq!(xp, 1700);
    let level = Level::from_xp(xp);
    assert_eq!(level.level, 9);
    assert_eq!(level.title(), "Health Explorer");
    assert_eq!(Level::from_xp(0).title(), "Health Novice");
  }
}
