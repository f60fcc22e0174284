//! The health-awareness quiz: a fixed question bank, scoring and the
//! completion certificate.

use chrono::NaiveDate;
use serde::Serialize;

use crate::log::NewQuizResult;

/// Category recorded on every stored quiz result.
pub const QUIZ_CATEGORY: &str = "Health Awareness";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
  pub question:    &'static str,
  pub options:     &'static [&'static str],
  /// Index into `options`.
  pub correct:     usize,
  pub category:    &'static str,
  pub explanation: &'static str,
}

pub const QUESTIONS: &[QuizQuestion] = &[
  QuizQuestion {
    question:    "How many glasses of water should you drink daily?",
    options:     &["4-5 glasses", "6-7 glasses", "8-10 glasses", "12+ glasses"],
    correct:     2,
    category:    "Hydration",
    explanation: "The general recommendation is 8-10 glasses (about 2-2.5 liters) of water \
                  daily, though individual needs may vary based on activity level, climate, \
                  and health conditions.",
  },
  QuizQuestion {
    question:    "What is the recommended amount of sleep for adults?",
    options:     &["5-6 hours", "7-9 hours", "10-12 hours", "4-5 hours"],
    correct:     1,
    category:    "Sleep",
    explanation: "Adults should aim for 7-9 hours of quality sleep per night for optimal \
                  health, cognitive function, and immune system support.",
  },
  QuizQuestion {
    question:    "How often should you wash your hands?",
    options:     &["Once a day", "Only when dirty", "Frequently throughout the day", "Only before meals"],
    correct:     2,
    category:    "Hygiene",
    explanation: "Frequent handwashing throughout the day is one of the most effective ways \
                  to prevent the spread of germs and infections.",
  },
  QuizQuestion {
    question:    "What should you do first for a minor cut?",
    options:     &["Apply bandage", "Clean the wound", "Apply antiseptic", "Leave it alone"],
    correct:     1,
    category:    "First Aid",
    explanation: "Always clean the wound first with clean water to remove dirt and bacteria \
                  before applying any treatment or bandage.",
  },
  QuizQuestion {
    question:    "How many servings of fruits and vegetables should you eat daily?",
    options:     &["1-2 servings", "3-4 servings", "5-9 servings", "10+ servings"],
    correct:     2,
    category:    "Nutrition",
    explanation: "Health experts recommend 5-9 servings of fruits and vegetables daily to \
                  ensure adequate vitamin, mineral, and fiber intake.",
  },
  QuizQuestion {
    question:    "What is the recommended daily physical activity for adults?",
    options:     &["10 minutes", "30 minutes", "60 minutes", "2 hours"],
    correct:     1,
    category:    "Exercise",
    explanation: "Adults should aim for at least 30 minutes of moderate-intensity physical \
                  activity most days of the week for cardiovascular health.",
  },
  QuizQuestion {
    question:    "How long should you wash your hands?",
    options:     &["5 seconds", "10 seconds", "20 seconds", "30 seconds"],
    correct:     2,
    category:    "Hygiene",
    explanation: "Washing hands for at least 20 seconds (about the time it takes to sing \
                  'Happy Birthday' twice) ensures effective removal of germs.",
  },
  QuizQuestion {
    question:    "What should you do if someone is choking?",
    options:     &["Give them water", "Perform Heimlich maneuver", "Make them lie down", "Call for help only"],
    correct:     1,
    category:    "First Aid",
    explanation: "The Heimlich maneuver (abdominal thrusts) is the most effective immediate \
                  response to help dislodge an object from someone's airway.",
  },
];

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// Count answers that pick the correct option for their question.
///
/// `answers[i]` is the option chosen for question `i`; `None` means skipped.
/// Answers beyond the question bank are ignored.
pub fn score(questions: &[QuizQuestion], answers: &[Option<usize>]) -> u32 {
  questions
    .iter()
    .zip(answers)
    .filter(|(q, a)| **a == Some(q.correct))
    .count() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum ScoreTier {
  #[strum(to_string = "Expert Level")]
  Expert,
  Advanced,
  Intermediate,
  Beginner,
}

impl ScoreTier {
  /// Tier for a raw (unrounded) percentage.
  pub fn from_percentage(percentage: f64) -> Self {
    if percentage >= 90.0 {
      Self::Expert
    } else if percentage >= 70.0 {
      Self::Advanced
    } else if percentage >= 50.0 {
      Self::Intermediate
    } else {
      Self::Beginner
    }
  }

  pub fn message(self) -> &'static str {
    match self {
      Self::Expert => "Excellent! You're a health expert!",
      Self::Advanced => "Great job! You have solid health knowledge!",
      Self::Intermediate => "Good effort! Keep learning about health!",
      Self::Beginner => "Keep learning! Every step counts!",
    }
  }
}

/// A finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
  pub score: u32,
  pub total: u32,
}

impl QuizOutcome {
  pub fn grade(questions: &[QuizQuestion], answers: &[Option<usize>]) -> Self {
    Self { score: score(questions, answers), total: questions.len() as u32 }
  }

  fn ratio(&self) -> f64 {
    if self.total == 0 {
      return 0.0;
    }
    f64::from(self.score) / f64::from(self.total) * 100.0
  }

  /// Rounded percentage, as shown to the user.
  pub fn percentage(&self) -> u32 { self.ratio().round() as u32 }

  pub fn tier(&self) -> ScoreTier { ScoreTier::from_percentage(self.ratio()) }

  /// The journal entry recorded when the quiz is completed.
  pub fn to_result(&self, date: NaiveDate) -> NewQuizResult {
    NewQuizResult {
      date,
      score: self.score,
      total_questions: self.total,
      category: QUIZ_CATEGORY.to_owned(),
    }
  }
}

// ─── Certificate ─────────────────────────────────────────────────────────────

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

/// Render a self-contained HTML certificate for a completed quiz.
pub fn render_certificate(holder: &str, outcome: &QuizOutcome, date: NaiveDate) -> String {
  let holder = escape_html(holder.trim());
  let holder = if holder.is_empty() { "Health Learner".to_owned() } else { holder };
  let tier = outcome.tier();

  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Health Awareness Certificate</title>
<style>
  body {{ font-family: Georgia, serif; background: #f5f7fa; margin: 0; padding: 40px; }}
  .certificate {{ max-width: 760px; margin: 0 auto; background: #fff; border: 10px double #3b82f6;
                  padding: 48px; text-align: center; }}
  h1 {{ color: #1e3a8a; letter-spacing: 2px; }}
  .holder {{ font-size: 28px; font-weight: bold; margin: 24px 0; }}
  .score {{ font-size: 22px; color: #047857; }}
  .footer {{ margin-top: 40px; color: #6b7280; font-size: 14px; }}
</style>
</head>
<body>
<div class="certificate">
  <h1>HEALTH AWARENESS CERTIFICATE</h1>
  <p>This certifies that</p>
  <p class="holder">{holder}</p>
  <p>has successfully completed the SymptoTrack Health Awareness Quiz with a score of</p>
  <p class="score">{score}/{total} ({percentage}%)</p>
  <p>{tier}: {message}</p>
  <p class="footer">Date: {date}</p>
</div>
</body>
</html>
"#,
    score = outcome.score,
    total = outcome.total,
    percentage = outcome.percentage(),
    message = tier.message(),
    date = date.format("%B %-d, %Y"),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn all_correct() -> Vec<Option<usize>> { QUESTIONS.iter().map(|q| Some(q.correct)).collect() }

  #[test]
  fn bank_has_eight_questions_with_valid_answers() {
    assert_eq!(QUESTIONS.len(), 8);
    assert!(QUESTIONS.iter().all(|q| q.correct < q.options.len()));
  }

  #[test]
  fn perfect_run_is_expert() {
    let outcome = QuizOutcome::grade(QUESTIONS, &all_correct());
    assert_eq!(outcome, QuizOutcome { score: 8, total: 8 });
    assert_eq!(outcome.percentage(), 100);
    assert_eq!(outcome.tier(), ScoreTier::Expert);
    assert_eq!(outcome.tier().to_string(), "Expert Level");
  }

  #[test]
  fn skipped_and_surplus_answers() {
    let mut answers = all_correct();
    answers[0] = None;
    answers[1] = Some(0);
    answers.push(Some(0));
    assert_eq!(score(QUESTIONS, &answers), 6);
    assert_eq!(score(QUESTIONS, &[]), 0);
  }

  #[test]
  fn tiers_use_unrounded_percentage() {
    // 7/8 = 87.5%
    assert_eq!(QuizOutcome { score: 7, total: 8 }.tier(), ScoreTier::Advanced);
    assert_eq!(QuizOutcome { score: 4, total: 8 }.tier(), ScoreTier::Intermediate);
    assert_eq!(QuizOutcome { score: 3, total: 8 }.tier(), ScoreTier::Beginner);
    assert_eq!(QuizOutcome { score: 0, total: 0 }.percentage(), 0);
  }

  #[test]
  fn result_for_journal() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let result = QuizOutcome { score: 6, total: 8 }.to_result(date);
    assert_eq!(result.category, "Health Awareness");
    assert_eq!(result.total_questions, 8);
  }

  #[test]
  fn certificate_escapes_holder() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let html = render_certificate("<b>Sam</b>", &QuizOutcome { score: 8, total: 8 }, date);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("&lt;b&gt;Sam&lt;/b&gt;"));
    assert!(html.contains("8/8 (100%)"));
    assert!(html.contains("June 1, 2024"));
    assert!(html.contains("Expert Level"));
  }
}
