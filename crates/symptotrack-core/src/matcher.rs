//! Symptom-to-condition matching and confidence scoring.
//!
//! A pure, synchronous pass over the disease catalog. The output depends only
//! on the selection, the profile and the catalog; there is no randomness.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Disease, DiseaseSeverity, Prevalence};

/// Shown alongside every analysis.
pub const DISCLAIMER: &str = "This tool provides general health information and should not \
                              replace professional medical advice. Always consult with a \
                              healthcare provider for proper diagnosis and treatment. In case \
                              of emergency, call your local emergency services immediately.";

// ─── Profile ─────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgeBracket {
  Child,
  Teen,
  Adult,
  Senior,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SymptomDuration {
  Acute,
  Chronic,
}

/// How bad the user says their symptoms are.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportedSeverity {
  Mild,
  Moderate,
  Severe,
}

/// Optional patient context that nudges confidence up or down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
  pub age:             Option<AgeBracket>,
  pub duration:        Option<SymptomDuration>,
  pub severity:        Option<ReportedSeverity>,
  /// Free text; matched by lowercase keyword.
  pub medical_history: Option<String>,
}

// ─── Result ──────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Medium,
  High,
}

/// One ranked candidate condition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseMatch {
  pub disease:          &'static Disease,
  pub match_count:      usize,
  pub match_percentage: u8,
  /// Heuristic 0–100 score, not a probability.
  pub confidence:       u8,
  pub risk_level:       RiskLevel,
}

// ─── Adjustment tables ───────────────────────────────────────────────────────

/// Age bracket and a fragment of the disease name that together earn +10.
const AGE_RULES: &[(AgeBracket, &str)] = &[
  (AgeBracket::Child, "Common Cold"),
  (AgeBracket::Child, "Gastroenteritis"),
  (AgeBracket::Adult, "Tension Headache"),
  (AgeBracket::Adult, "Migraine"),
  (AgeBracket::Senior, "Influenza"),
  (AgeBracket::Senior, "Pneumonia"),
];

const AGE_BONUS: i32 = 10;

/// History keyword, disease-name fragment, bonus.
const HISTORY_RULES: &[(&str, &str, i32)] = &[
  ("asthma", "Influenza", 10),
  ("asthma", "Pneumonia", 10),
  ("smok", "Pneumonia", 10),
  ("migraine", "Migraine", 10),
  ("diabetes", "Influenza", 5),
  ("diabetes", "Pneumonia", 5),
  ("allerg", "Common Cold", 5),
  ("ibs", "Gastroenteritis", 5),
  ("digestive", "Gastroenteritis", 5),
  ("stress", "Tension Headache", 5),
  ("anxiety", "Tension Headache", 5),
];

fn severity_offset(severity: ReportedSeverity) -> i32 {
  match severity {
    ReportedSeverity::Severe => 15,
    ReportedSeverity::Moderate => 5,
    ReportedSeverity::Mild => -5,
  }
}

fn duration_offset(duration: SymptomDuration) -> i32 {
  match duration {
    SymptomDuration::Chronic => 10,
    SymptomDuration::Acute => -5,
  }
}

fn prevalence_offset(prevalence: Prevalence) -> i32 {
  match prevalence {
    Prevalence::Common => 15,
    Prevalence::Uncommon => 5,
    Prevalence::Rare => -20,
  }
}

// ─── Scoring ─────────────────────────────────────────────────────────────────

/// `round(count / total * 100)` with halves rounded up, in integer arithmetic.
pub fn match_percentage(count: usize, total: usize) -> u8 {
  if total == 0 {
    return 0;
  }
  let pct = (200 * count + total) / (2 * total);
  pct.min(100) as u8
}

/// Confidence for one disease: the match percentage plus every profile
/// offset, clamped to `[0, 100]`.
pub fn confidence(
  disease: &Disease,
  match_percentage: u8,
  profile: &PatientProfile,
) -> u8 {
  let mut score = i32::from(match_percentage);

  if let Some(severity) = profile.severity {
    score += severity_offset(severity);
  }
  if let Some(duration) = profile.duration {
    score += duration_offset(duration);
  }
  score += prevalence_offset(disease.prevalence);

  if let Some(age) = profile.age {
    score += AGE_RULES
      .iter()
      .filter(|(bracket, name)| *bracket == age && disease.name.contains(name))
      .count() as i32
      * AGE_BONUS;
  }

  if let Some(history) = profile.medical_history.as_deref() {
    let history = history.to_lowercase();
    score += HISTORY_RULES
      .iter()
      .filter(|(keyword, name, _)| {
        history.contains(keyword) && disease.name.contains(name)
      })
      .map(|(_, _, bonus)| bonus)
      .sum::<i32>();
  }

  score.clamp(0, 100) as u8
}

pub fn risk_level(severity: DiseaseSeverity, confidence: u8) -> RiskLevel {
  if severity == DiseaseSeverity::High || confidence > 80 {
    RiskLevel::High
  } else if severity == DiseaseSeverity::Medium || confidence > 60 {
    RiskLevel::Medium
  } else {
    RiskLevel::Low
  }
}

/// Rank `diseases` against the selected symptom names.
///
/// Diseases with no selected symptom are dropped. The result is sorted by
/// descending confidence; ties keep catalog order. An empty selection yields
/// an empty result.
pub fn analyze(
  diseases: &'static [Disease],
  selection: &BTreeSet<String>,
  profile: &PatientProfile,
) -> Vec<DiseaseMatch> {
  if selection.is_empty() {
    return Vec::new();
  }

  let mut matches: Vec<DiseaseMatch> = diseases
    .iter()
    .filter_map(|disease| {
      let match_count = disease
        .common_symptoms
        .iter()
        .filter(|s| selection.contains(**s))
        .count();
      let match_percentage = match_percentage(match_count, selection.len());
      if match_percentage == 0 {
        return None;
      }
      let confidence = confidence(disease, match_percentage, profile);
      Some(DiseaseMatch {
        disease,
        match_count,
        match_percentage,
        confidence,
        risk_level: risk_level(disease.severity, confidence),
      })
    })
    .collect();

  // `sort_by` is stable.
  matches.sort_by(|a, b| b.confidence.cmp(&a.confidence));
  matches
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Catalog, DISEASES};

  fn select(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
  }

  fn everything() -> PatientProfile {
    PatientProfile {
      age:             Some(AgeBracket::Senior),
      duration:        Some(SymptomDuration::Chronic),
      severity:        Some(ReportedSeverity::Severe),
      medical_history: Some("Asthma, smoker, diabetes, migraine, allergies, IBS, stress".into()),
    }
  }

  #[test]
  fn percentage_rounds_half_up() {
    assert_eq!(match_percentage(1, 3), 33);
    assert_eq!(match_percentage(2, 3), 67);
    assert_eq!(match_percentage(1, 8), 13); // 12.5
    assert_eq!(match_percentage(0, 4), 0);
    assert_eq!(match_percentage(4, 4), 100);
    assert_eq!(match_percentage(1, 0), 0);
  }

  #[test]
  fn common_cold_scenario() {
    let selection = select(&["Runny Nose", "Sore Throat", "Cough", "Headache", "Body Aches"]);
    let results = analyze(DISEASES, &selection, &PatientProfile::default());

    let top = &results[0];
    assert_eq!(top.disease.name, "Common Cold");
    assert_eq!(top.match_percentage, 100);
    assert_eq!(top.match_count, 5);
    assert_eq!(top.confidence, 100);
  }

  #[test]
  fn percentage_matches_formula_for_every_disease() {
    let selections = [
      select(&["Fever"]),
      select(&["Fever", "Nausea", "Skin Rash"]),
      select(&["Headache", "Dizziness", "Sensitivity to Light", "Muscle Tension"]),
      select(&["Cough", "Chest Pain", "Sneezing", "Chills", "Vomiting", "Diarrhea", "Fatigue"]),
    ];
    for selection in &selections {
      let results = analyze(DISEASES, selection, &PatientProfile::default());
      for disease in DISEASES {
        let count = disease.common_symptoms.iter().filter(|s| selection.contains(**s)).count();
        let expected =
          ((100.0 * count as f64) / selection.len() as f64).round() as u8;
        match results.iter().find(|m| m.disease.name == disease.name) {
          Some(m) => assert_eq!(m.match_percentage, expected),
          None => assert_eq!(count, 0, "{} dropped despite a match", disease.name),
        }
      }
    }
  }

  #[test]
  fn unrelated_selection_has_no_matches() {
    let results = analyze(DISEASES, &select(&["Skin Rash"]), &PatientProfile::default());
    assert!(results.is_empty());
  }

  #[test]
  fn empty_selection_is_not_analyzed() {
    assert!(analyze(DISEASES, &BTreeSet::new(), &everything()).is_empty());
  }

  #[test]
  fn confidence_is_clamped_with_every_bonus() {
    let all: BTreeSet<String> =
      Catalog::builtin().symptoms.iter().map(|s| s.name.to_owned()).collect();
    for profile in [everything(), PatientProfile::default()] {
      for m in analyze(DISEASES, &all, &profile) {
        assert!(m.confidence <= 100);
      }
    }

    let pneumonia = Catalog::builtin().disease("Pneumonia").unwrap();
    assert_eq!(confidence(pneumonia, 100, &everything()), 100);
  }

  #[test]
  fn confidence_floors_at_zero() {
    static RARE: Disease = Disease { prevalence: Prevalence::Rare, ..DISEASES[0] };
    let profile = PatientProfile {
      severity: Some(ReportedSeverity::Mild),
      duration: Some(SymptomDuration::Acute),
      ..PatientProfile::default()
    };
    // 5 - 5 - 5 - 20 = -25
    assert_eq!(confidence(&RARE, 5, &profile), 0);
  }

  #[test]
  fn offsets_add_up() {
    let migraine = Catalog::builtin().disease("Migraine").unwrap();
    let profile = PatientProfile {
      age:             Some(AgeBracket::Adult),
      duration:        Some(SymptomDuration::Acute),
      severity:        Some(ReportedSeverity::Moderate),
      medical_history: Some("History of MIGRAINE".into()),
    };
    // 40 + 5 - 5 + 5 (uncommon) + 10 (adult) + 10 (history)
    assert_eq!(confidence(migraine, 40, &profile), 65);
  }

  #[test]
  fn ordering_is_non_increasing() {
    let selection = select(&["Fever", "Cough", "Headache", "Nausea", "Fatigue"]);
    let results = analyze(DISEASES, &selection, &everything());
    assert!(results.windows(2).all(|w| w[0].confidence >= w[1].confidence));
  }

  #[test]
  fn ties_keep_catalog_order() {
    // Both clamp to 100 with a severe chronic profile.
    let selection = select(&["Fever", "Cough", "Body Aches", "Headache", "Sore Throat"]);
    let profile = PatientProfile {
      severity: Some(ReportedSeverity::Severe),
      duration: Some(SymptomDuration::Chronic),
      ..PatientProfile::default()
    };
    let results = analyze(DISEASES, &selection, &profile);
    assert_eq!(results[0].confidence, results[1].confidence);
    assert_eq!(results[0].disease.name, "Common Cold");
    assert_eq!(results[1].disease.name, "Influenza (Flu)");
  }

  #[test]
  fn deterministic() {
    let selection = select(&["Fever", "Chills", "Chest Pain"]);
    let a = analyze(DISEASES, &selection, &everything());
    let b = analyze(DISEASES, &selection, &everything());
    let key = |v: &[DiseaseMatch]| {
      v.iter().map(|m| (m.disease.name, m.confidence)).collect::<Vec<_>>()
    };
    assert_eq!(key(&a), key(&b));
  }

  #[test]
  fn risk_labels() {
    assert_eq!(risk_level(DiseaseSeverity::High, 10), RiskLevel::High);
    assert_eq!(risk_level(DiseaseSeverity::Low, 81), RiskLevel::High);
    assert_eq!(risk_level(DiseaseSeverity::Low, 80), RiskLevel::Medium);
    assert_eq!(risk_level(DiseaseSeverity::Medium, 0), RiskLevel::Medium);
    assert_eq!(risk_level(DiseaseSeverity::Low, 60), RiskLevel::Low);
  }
}
