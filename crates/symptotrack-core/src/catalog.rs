//! Static symptom and disease reference data.
//!
//! The catalog is read-only. Logged symptom names are free text and are only
//! related to catalog entries by string equality; nothing enforces that a
//! logged name exists here.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use serde::Serialize;

// ─── Symptoms ────────────────────────────────────────────────────────────────

/// How unpleasant a symptom usually is. Presentation metadata only.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SymptomSeverity {
  Mild,
  Moderate,
  Severe,
}

/// A named, user-selectable health complaint used as matching input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
  pub id:        &'static str,
  pub name:      &'static str,
  pub category:  &'static str,
  pub severity:  SymptomSeverity,
  pub body_part: &'static str,
}

// ─── Diseases ────────────────────────────────────────────────────────────────

/// Clinical severity of a condition; feeds the risk label.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiseaseSeverity {
  Low,
  Medium,
  High,
}

/// How often the condition is seen in the general population.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Prevalence {
  Common,
  Uncommon,
  Rare,
}

/// A catalog entry describing a condition and its guidance text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disease {
  pub id:                 &'static str,
  pub name:               &'static str,
  pub description:        &'static str,
  pub common_symptoms:    &'static [&'static str],
  pub severity:           DiseaseSeverity,
  pub prevention:         &'static [&'static str],
  pub when_to_see_doctor: &'static [&'static str],
  pub home_remedies:      &'static [&'static str],
  pub treatment_options:  &'static [&'static str],
  pub complications:      &'static [&'static str],
  pub risk_factors:       &'static [&'static str],
  pub similar_conditions: &'static [&'static str],
  pub prevalence:         Prevalence,
  pub contagious:         bool,
  pub specialist:         &'static str,
  pub prognosis:          &'static str,
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// The reference data the matcher and the CLI work against.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
  pub symptoms: &'static [Symptom],
  pub diseases: &'static [Disease],
}

impl Catalog {
  /// The built-in reference data.
  pub const fn builtin() -> Self {
    Self { symptoms: SYMPTOMS, diseases: DISEASES }
  }

  pub fn symptom(&self, name: &str) -> Option<&'static Symptom> {
    self.symptoms.iter().find(|s| s.name == name)
  }

  pub fn disease(&self, name: &str) -> Option<&'static Disease> {
    self.diseases.iter().find(|d| d.name == name)
  }

  /// Case-insensitive substring filter over symptom names, in catalog order.
  pub fn search_symptoms(&self, term: &str) -> Vec<&'static Symptom> {
    let needle = term.trim().to_lowercase();
    self
      .symptoms
      .iter()
      .filter(|s| s.name.to_lowercase().contains(&needle))
      .collect()
  }

  /// Symptoms grouped by category; groups appear in first-seen order.
  pub fn symptoms_by_category(&self) -> Vec<(&'static str, Vec<&'static Symptom>)> {
    let mut groups: Vec<(&'static str, Vec<&'static Symptom>)> = Vec::new();
    for symptom in self.symptoms {
      match groups.iter_mut().find(|(cat, _)| *cat == symptom.category) {
        Some((_, members)) => members.push(symptom),
        None => groups.push((symptom.category, vec![symptom])),
      }
    }
    groups
  }

  /// Map free user input onto a catalog symptom.
  ///
  /// Tries an exact match, then a case-insensitive one, then a fuzzy match.
  /// The fuzzy match must score at least [`MIN_FUZZY_SCORE_PER_CHAR`] per
  /// input character and beat the runner-up by [`FUZZY_MARGIN`]; otherwise
  /// the input is ambiguous or unrelated and `None` is returned.
  pub fn resolve_symptom(&self, input: &str) -> Option<&'static Symptom> {
    let input = input.trim();
    if input.is_empty() {
      return None;
    }
    if let Some(exact) = self.symptom(input) {
      return Some(exact);
    }
    if let Some(folded) = self.fold_case(input) {
      return Some(folded);
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &'static Symptom)> = self
      .symptoms
      .iter()
      .filter_map(|s| matcher.fuzzy_match(s.name, input).map(|score| (score, s)))
      .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let floor = MIN_FUZZY_SCORE_PER_CHAR * input.chars().count() as i64;
    match scored.as_slice() {
      [(best, symptom), rest @ ..]
        if *best >= floor && rest.first().is_none_or(|(next, _)| best - next >= FUZZY_MARGIN) =>
      {
        Some(*symptom)
      }
      _ => None,
    }
  }

  /// Trimmed input with catalog spelling applied on a case-insensitive exact
  /// match. Anything else is kept as typed; blank input yields `None`.
  pub fn canonical_name(&self, input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
      return None;
    }
    Some(self.fold_case(input).map_or(input, |s| s.name).to_owned())
  }

  fn fold_case(&self, input: &str) -> Option<&'static Symptom> {
    self.symptoms.iter().find(|s| s.name.eq_ignore_ascii_case(input))
  }
}

/// Lowest fuzzy score accepted, per input character. A full-score match is
/// 16 per character plus bonuses.
pub const MIN_FUZZY_SCORE_PER_CHAR: i64 = 12;

/// How far the best fuzzy match must lead the second best.
pub const FUZZY_MARGIN: i64 = 16;

// ─── Built-in data ───────────────────────────────────────────────────────────

const fn symptom(
  id: &'static str,
  name: &'static str,
  category: &'static str,
  severity: SymptomSeverity,
  body_part: &'static str,
) -> Symptom {
  Symptom { id, name, category, severity, body_part }
}

use SymptomSeverity::{Mild, Moderate, Severe};

pub const SYMPTOMS: &[Symptom] = &[
  symptom("1", "Fever", "General", Moderate, "Whole Body"),
  symptom("2", "Headache", "Neurological", Mild, "Head"),
  symptom("3", "Cough", "Respiratory", Mild, "Chest"),
  symptom("4", "Sore Throat", "Respiratory", Mild, "Throat"),
  symptom("5", "Runny Nose", "Respiratory", Mild, "Nose"),
  symptom("6", "Body Aches", "General", Moderate, "Whole Body"),
  symptom("7", "Fatigue", "General", Mild, "Whole Body"),
  symptom("8", "Nausea", "Digestive", Moderate, "Stomach"),
  symptom("9", "Vomiting", "Digestive", Moderate, "Stomach"),
  symptom("10", "Diarrhea", "Digestive", Moderate, "Abdomen"),
  symptom("11", "Stomach Pain", "Digestive", Moderate, "Abdomen"),
  symptom("12", "Dizziness", "Neurological", Moderate, "Head"),
  symptom("13", "Chest Pain", "Cardiovascular", Severe, "Chest"),
  symptom("14", "Shortness of Breath", "Respiratory", Severe, "Chest"),
  symptom("15", "Skin Rash", "Dermatological", Mild, "Skin"),
  symptom("16", "Sensitivity to Light", "Neurological", Moderate, "Eyes"),
  symptom("17", "Chills", "General", Mild, "Whole Body"),
  symptom("18", "Loss of Appetite", "Digestive", Mild, "Stomach"),
  symptom("19", "Sneezing", "Respiratory", Mild, "Nose"),
  symptom("20", "Muscle Tension", "Musculoskeletal", Mild, "Neck"),
];

pub const DISEASES: &[Disease] = &[
  Disease {
    id:                 "1",
    name:               "Common Cold",
    description:        "A viral infection of the upper respiratory tract that is very \
                         common and usually mild.",
    common_symptoms:    &["Runny Nose", "Sore Throat", "Cough", "Headache", "Body Aches"],
    severity:           DiseaseSeverity::Low,
    prevention:         &[
      "Wash hands frequently with soap and water",
      "Avoid close contact with sick people",
      "Don't touch your face with unwashed hands",
      "Get adequate sleep and maintain a healthy diet",
      "Stay hydrated",
    ],
    when_to_see_doctor: &[
      "Symptoms last more than 10 days",
      "Fever higher than 101.3°F (38.5°C)",
      "Severe headache or sinus pain",
      "Difficulty breathing or wheezing",
    ],
    home_remedies:      &[
      "Rest and get plenty of sleep",
      "Drink warm liquids like tea or soup",
      "Use a humidifier or breathe steam",
      "Gargle with salt water for sore throat",
      "Take over-the-counter pain relievers as needed",
    ],
    treatment_options:  &[
      "Over-the-counter decongestants",
      "Antihistamines for a runny nose",
      "Throat lozenges",
    ],
    complications:      &["Sinusitis", "Ear infection", "Asthma flare-ups"],
    risk_factors:       &["Young age", "Weakened immune system", "Winter season", "Smoking"],
    similar_conditions: &["Influenza (Flu)", "Allergic rhinitis"],
    prevalence:         Prevalence::Common,
    contagious:         true,
    specialist:         "General Practitioner",
    prognosis:          "Usually resolves on its own within 7 to 10 days.",
  },
  Disease {
    id:                 "2",
    name:               "Influenza (Flu)",
    description:        "A viral infection that attacks your respiratory system and can \
                         cause severe illness.",
    common_symptoms:    &[
      "Fever", "Cough", "Body Aches", "Fatigue", "Headache", "Sore Throat", "Chills",
    ],
    severity:           DiseaseSeverity::Medium,
    prevention:         &[
      "Get an annual flu vaccine",
      "Wash hands frequently",
      "Avoid touching your face",
      "Stay away from sick people",
      "Maintain good overall health",
    ],
    when_to_see_doctor: &[
      "Difficulty breathing or shortness of breath",
      "Chest pain or pressure",
      "Sudden dizziness or confusion",
      "Severe or persistent vomiting",
      "High fever that doesn't respond to medication",
    ],
    home_remedies:      &[
      "Rest and stay home",
      "Drink plenty of fluids",
      "Take antiviral medications if prescribed early",
      "Use pain relievers for aches and fever",
      "Use a humidifier to ease congestion",
    ],
    treatment_options:  &[
      "Antiviral medication within 48 hours of onset",
      "Fever reducers",
      "Fluids and rest",
    ],
    complications:      &["Pneumonia", "Bronchitis", "Worsening of chronic conditions"],
    risk_factors:       &["Age over 65", "Pregnancy", "Asthma", "Diabetes", "Heart disease"],
    similar_conditions: &["Common Cold", "Pneumonia"],
    prevalence:         Prevalence::Common,
    contagious:         true,
    specialist:         "General Practitioner",
    prognosis:          "Most people recover within one to two weeks.",
  },
  Disease {
    id:                 "3",
    name:               "Gastroenteritis",
    description:        "Inflammation of the stomach and intestines, often called stomach flu.",
    common_symptoms:    &[
      "Nausea", "Vomiting", "Diarrhea", "Stomach Pain", "Fever", "Body Aches",
      "Loss of Appetite",
    ],
    severity:           DiseaseSeverity::Medium,
    prevention:         &[
      "Wash hands thoroughly and frequently",
      "Avoid contaminated food and water",
      "Don't share personal items",
      "Clean and disinfect surfaces",
      "Practice food safety",
    ],
    when_to_see_doctor: &[
      "Signs of severe dehydration",
      "Blood in vomit or stool",
      "High fever (over 102°F)",
      "Severe abdominal pain",
      "Symptoms persist for more than a few days",
    ],
    home_remedies:      &[
      "Stay hydrated with clear fluids",
      "Rest and avoid solid foods initially",
      "Try the BRAT diet (bananas, rice, applesauce, toast)",
      "Use oral rehydration solutions",
      "Gradually return to normal diet",
    ],
    treatment_options:  &["Oral rehydration therapy", "Anti-nausea medication", "IV fluids if severe"],
    complications:      &["Dehydration", "Electrolyte imbalance"],
    risk_factors:       &["Young children", "Older adults", "Shared living spaces", "Travel"],
    similar_conditions: &["Food poisoning", "Irritable bowel syndrome"],
    prevalence:         Prevalence::Common,
    contagious:         true,
    specialist:         "Gastroenterologist",
    prognosis:          "Usually improves within one to three days.",
  },
  Disease {
    id:                 "4",
    name:               "Tension Headache",
    description:        "The most common type of headache, often caused by stress or \
                         muscle tension.",
    common_symptoms:    &["Headache", "Fatigue", "Dizziness", "Muscle Tension"],
    severity:           DiseaseSeverity::Low,
    prevention:         &[
      "Manage stress effectively",
      "Maintain regular sleep schedule",
      "Stay hydrated",
      "Exercise regularly",
      "Limit caffeine and alcohol",
    ],
    when_to_see_doctor: &[
      "Sudden, severe headache",
      "Headache with fever and stiff neck",
      "Headache after head injury",
      "Progressive worsening of headaches",
      "Headache with vision changes",
    ],
    home_remedies:      &[
      "Apply cold or warm compress",
      "Practice relaxation techniques",
      "Get adequate sleep",
      "Stay hydrated",
      "Take over-the-counter pain relievers",
    ],
    treatment_options:  &["Over-the-counter pain relievers", "Physical therapy", "Stress management"],
    complications:      &["Chronic daily headache", "Medication overuse headache"],
    risk_factors:       &["Stress", "Poor posture", "Lack of sleep", "Eye strain"],
    similar_conditions: &["Migraine"],
    prevalence:         Prevalence::Common,
    contagious:         false,
    specialist:         "General Practitioner",
    prognosis:          "Episodes usually pass within hours and respond well to self-care.",
  },
  Disease {
    id:                 "5",
    name:               "Migraine",
    description:        "A neurological condition causing intense, often one-sided \
                         headaches with nausea and sensitivity to light.",
    common_symptoms:    &[
      "Headache", "Nausea", "Sensitivity to Light", "Dizziness", "Vomiting",
    ],
    severity:           DiseaseSeverity::Medium,
    prevention:         &[
      "Identify and avoid personal triggers",
      "Keep a regular sleep and meal schedule",
      "Limit caffeine",
      "Manage stress",
    ],
    when_to_see_doctor: &[
      "The worst headache of your life",
      "Headache with weakness or numbness",
      "Headache with confusion or trouble speaking",
      "Migraines becoming more frequent",
    ],
    home_remedies:      &[
      "Rest in a dark, quiet room",
      "Apply a cold compress to the forehead",
      "Stay hydrated",
      "Take pain relievers at the first sign of an attack",
    ],
    treatment_options:  &["Triptans", "Preventive medication", "Anti-nausea medication"],
    complications:      &["Chronic migraine", "Medication overuse headache"],
    risk_factors:       &["Family history", "Hormonal changes", "Stress", "Irregular sleep"],
    similar_conditions: &["Tension Headache"],
    prevalence:         Prevalence::Uncommon,
    contagious:         false,
    specialist:         "Neurologist",
    prognosis:          "A chronic condition that is usually well controlled with treatment.",
  },
  Disease {
    id:                 "6",
    name:               "Pneumonia",
    description:        "An infection that inflames the air sacs in one or both lungs, \
                         which may fill with fluid.",
    common_symptoms:    &[
      "Fever", "Cough", "Shortness of Breath", "Chest Pain", "Fatigue", "Chills",
    ],
    severity:           DiseaseSeverity::High,
    prevention:         &[
      "Get vaccinated against pneumococcus and flu",
      "Don't smoke",
      "Wash hands regularly",
      "Keep your immune system strong",
    ],
    when_to_see_doctor: &[
      "Difficulty breathing",
      "Chest pain",
      "Persistent fever of 102°F (39°C) or higher",
      "Persistent cough, especially with pus",
    ],
    home_remedies:      &[
      "Rest and drink plenty of fluids",
      "Take all prescribed medication",
      "Use a humidifier",
    ],
    treatment_options:  &["Antibiotics for bacterial pneumonia", "Cough medicine", "Hospital care if severe"],
    complications:      &["Bacteremia", "Breathing difficulty", "Lung abscess", "Pleural effusion"],
    risk_factors:       &["Age over 65", "Smoking", "Chronic lung disease", "Weakened immune system"],
    similar_conditions: &["Influenza (Flu)", "Bronchitis"],
    prevalence:         Prevalence::Uncommon,
    contagious:         true,
    specialist:         "Pulmonologist",
    prognosis:          "Most people recover in one to three weeks; severe cases need hospital care.",
  },
];
