//! "Find your model" quiz: questions, answers and the step-by-step flow
//!
//! Answers are plain values. Every transition (`with_answer`, `next`,
//! `back`) returns a new value instead of mutating in place, so the caller
//! owns the state and the recommender only ever sees a finished
//! [`AnswerSet`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{FinderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionId {
  Duty,
  Budget,
  Battery,
  Volume,
  Features,
}

impl QuestionId {
  /// Questions in the order they are asked
  pub const ALL: [QuestionId; 5] =
    [QuestionId::Duty, QuestionId::Budget, QuestionId::Battery, QuestionId::Volume, QuestionId::Features];

  pub fn as_str(&self) -> &'static str {
    match self {
      QuestionId::Duty => "duty",
      QuestionId::Budget => "budget",
      QuestionId::Battery => "battery",
      QuestionId::Volume => "volume",
      QuestionId::Features => "features",
    }
  }
}

impl fmt::Display for QuestionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for QuestionId {
  type Err = FinderError;

  fn from_str(s: &str) -> Result<Self> {
    QuestionId::ALL
      .into_iter()
      .find(|question| question.as_str() == s)
      .ok_or_else(|| FinderError::UnknownQuestion { id: s.to_string() })
  }
}

macro_rules! quiz_options {
  (
    $(#[$meta:meta])*
    $name:ident for $question:ident {
      $($variant:ident => ($value:literal, $label:literal, $description:literal)),+ $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum $name {
      $(#[serde(rename = $value)] $variant),+
    }

    impl $name {
      pub const ALL: &'static [$name] = &[$($name::$variant),+];
      pub const QUESTION: QuestionId = QuestionId::$question;

      pub fn value(&self) -> &'static str {
        match self {
          $($name::$variant => $value),+
        }
      }

      pub fn label(&self) -> &'static str {
        match self {
          $($name::$variant => $label),+
        }
      }

      pub fn description(&self) -> &'static str {
        match self {
          $($name::$variant => $description),+
        }
      }

      fn options() -> Vec<QuestionOption> {
        Self::ALL
          .iter()
          .map(|option| QuestionOption {
            value: option.value(),
            label: option.label(),
            description: option.description(),
          })
          .collect()
      }
    }

    impl FromStr for $name {
      type Err = FinderError;

      fn from_str(s: &str) -> Result<Self> {
        match s {
          $($value => Ok($name::$variant),)+
          other => Err(FinderError::invalid_option(QuestionId::$question.as_str(), other)),
        }
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
      }
    }
  };
}

quiz_options! {
  /// Type of duty the strapping system will handle
  Duty for Duty {
    UltraLight => ("ultra-light", "Ultra-Light-Duty", "Light packages, minimal tension"),
    Light => ("light", "Light-Duty", "Standard packaging applications"),
    MediumHeavy => ("medium-heavy", "Medium/Heavy-Duty", "Heavy pallets, high tension"),
    Manual => ("manual", "Manual Operation", "Hand-crank operation"),
    MultiMaterial => ("multi-material", "Multi-Material", "Various strap types"),
  }
}

quiz_options! {
  Budget for Budget {
    Economy => ("economy", "Economy", "Best value, proven technology"),
    Premium => ("premium", "Premium", "Latest technology, maximum performance"),
    Flexible => ("flexible", "Flexible", "Open to both options"),
  }
}

quiz_options! {
  BatteryPreference for Battery {
    LeadFleece => ("lead-fleece", "Lead-Fleece", "Proven, affordable"),
    Lithium => ("lithium", "Lithium-Ion", "Lighter, faster charging, more cycles"),
    Manual => ("manual", "No Battery (Manual)", "Hand-crank operation"),
    NoPreference => ("no-preference", "No Preference", "Either is fine"),
  }
}

quiz_options! {
  /// Expected number of straps per day
  Volume for Volume {
    Low => ("low", "Low Volume", "Occasional use, < 100 straps/day"),
    Medium => ("medium", "Medium Volume", "Regular use, 100-500 straps/day"),
    High => ("high", "High Volume", "Heavy use, 500+ straps/day"),
  }
}

quiz_options! {
  FeaturePriority for Features {
    Basic => ("basic", "Basic Reliability", "Simple operation, proven performance"),
    Advanced => ("advanced", "Advanced Features", "Touchscreen, laser positioning"),
    Portable => ("portable", "Portability", "Mobile strapping solutions"),
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
  pub value: &'static str,
  pub label: &'static str,
  pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
  pub id: QuestionId,
  pub prompt: &'static str,
  pub options: Vec<QuestionOption>,
}

/// The five quiz questions in display order
pub fn questions() -> Vec<Question> {
  vec![
    Question {
      id: QuestionId::Duty,
      prompt: "What type of duty will your strapping system handle?",
      options: Duty::options(),
    },
    Question {
      id: QuestionId::Budget,
      prompt: "What is your budget preference?",
      options: Budget::options(),
    },
    Question {
      id: QuestionId::Battery,
      prompt: "What battery technology do you prefer?",
      options: BatteryPreference::options(),
    },
    Question {
      id: QuestionId::Volume,
      prompt: "What is your expected strapping volume?",
      options: Volume::options(),
    },
    Question {
      id: QuestionId::Features,
      prompt: "Which features are most important to you?",
      options: FeaturePriority::options(),
    },
  ]
}

/// Partially filled answers, keyed by question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizAnswers {
  pub duty: Option<Duty>,
  pub budget: Option<Budget>,
  pub battery: Option<BatteryPreference>,
  pub volume: Option<Volume>,
  pub features: Option<FeaturePriority>,
}

impl QuizAnswers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build answers from `(question id, option value)` pairs
  pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
  where
    I: IntoIterator<Item = (&'a str, &'a str)>,
  {
    pairs.into_iter().try_fold(Self::new(), |answers, (id, value)| {
      let question = id.parse::<QuestionId>()?;
      answers.with_answer(question, value)
    })
  }

  /// Copy of these answers with `question` set to `value`
  pub fn with_answer(&self, question: QuestionId, value: &str) -> Result<Self> {
    let mut next = self.clone();
    match question {
      QuestionId::Duty => next.duty = Some(value.parse()?),
      QuestionId::Budget => next.budget = Some(value.parse()?),
      QuestionId::Battery => next.battery = Some(value.parse()?),
      QuestionId::Volume => next.volume = Some(value.parse()?),
      QuestionId::Features => next.features = Some(value.parse()?),
    }
    Ok(next)
  }

  /// The chosen option value for `question`, if answered
  pub fn answer(&self, question: QuestionId) -> Option<&'static str> {
    match question {
      QuestionId::Duty => self.duty.map(|option| option.value()),
      QuestionId::Budget => self.budget.map(|option| option.value()),
      QuestionId::Battery => self.battery.map(|option| option.value()),
      QuestionId::Volume => self.volume.map(|option| option.value()),
      QuestionId::Features => self.features.map(|option| option.value()),
    }
  }

  pub fn is_answered(&self, question: QuestionId) -> bool {
    self.answer(question).is_some()
  }

  pub fn missing(&self) -> Vec<QuestionId> {
    QuestionId::ALL.into_iter().filter(|question| !self.is_answered(*question)).collect()
  }

  pub fn is_complete(&self) -> bool {
    self.missing().is_empty()
  }

  /// Turn a complete set of answers into an [`AnswerSet`]
  pub fn finish(&self) -> Result<AnswerSet> {
    match (self.duty, self.budget, self.battery, self.volume, self.features) {
      (Some(duty), Some(budget), Some(battery), Some(volume), Some(features)) => {
        Ok(AnswerSet { duty, budget, battery, volume, features })
      }
      _ => Err(FinderError::IncompleteAnswers {
        missing: self.missing().iter().map(|question| question.to_string()).collect(),
      }),
    }
  }
}

/// All five answers; the only input the recommender accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerSet {
  pub duty: Duty,
  pub budget: Budget,
  pub battery: BatteryPreference,
  pub volume: Volume,
  pub features: FeaturePriority,
}

/// Position in the step-by-step quiz
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizProgress {
  step: usize,
  answers: QuizAnswers,
  finished: bool,
}

impl QuizProgress {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn step(&self) -> usize {
    self.step
  }

  pub fn answers(&self) -> &QuizAnswers {
    &self.answers
  }

  pub fn current_question(&self) -> QuestionId {
    QuestionId::ALL[self.step]
  }

  /// Answer the question at the current step
  pub fn answer(&self, value: &str) -> Result<Self> {
    let answers = self.answers.with_answer(self.current_question(), value)?;
    Ok(Self { answers, ..self.clone() })
  }

  pub fn can_proceed(&self) -> bool {
    self.answers.is_answered(self.current_question())
  }

  /// Advance one step, or finish on the last question; no-op while unanswered
  pub fn next(&self) -> Self {
    if !self.can_proceed() {
      return self.clone();
    }
    if self.step + 1 < QuestionId::ALL.len() {
      Self { step: self.step + 1, ..self.clone() }
    } else {
      Self { finished: true, ..self.clone() }
    }
  }

  pub fn back(&self) -> Self {
    Self { step: self.step.saturating_sub(1), finished: false, ..self.clone() }
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  /// Share of the quiz reached, counting the current step
  pub fn progress_percent(&self) -> f64 {
    ((self.step + 1) as f64 / QuestionId::ALL.len() as f64) * 100.0
  }

  /// Completed answers once the last step has been passed
  pub fn result(&self) -> Option<AnswerSet> {
    if self.finished {
      self.answers.finish().ok()
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn full_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
      ("duty", "manual"),
      ("budget", "economy"),
      ("battery", "manual"),
      ("volume", "low"),
      ("features", "basic"),
    ]
  }

  #[test]
  fn test_questions_layout() {
    let questions = questions();
    assert_eq!(questions.len(), 5);
    let ids: Vec<QuestionId> = questions.iter().map(|question| question.id).collect();
    assert_eq!(ids, QuestionId::ALL.to_vec());
    assert_eq!(questions[0].options.len(), 5);
    assert_eq!(questions[1].options.len(), 3);
    assert_eq!(questions[2].options.len(), 4);
    assert_eq!(questions[3].options.len(), 3);
    assert_eq!(questions[4].options.len(), 3);
    assert_eq!(questions[2].options[1].value, "lithium");
  }

  #[test]
  fn test_option_parsing() {
    assert_eq!("medium-heavy".parse::<Duty>().unwrap(), Duty::MediumHeavy);
    assert_eq!("no-preference".parse::<BatteryPreference>().unwrap(), BatteryPreference::NoPreference);
    assert_eq!(Volume::High.to_string(), "high");

    let err = "gigantic".parse::<Volume>().unwrap_err();
    assert_eq!(err.to_string(), "'gigantic' is not a valid option for question 'volume'");
  }

  #[test]
  fn test_option_serde_uses_values() {
    assert_eq!(serde_json::to_string(&Duty::UltraLight).unwrap(), "\"ultra-light\"");
    let parsed: FeaturePriority = serde_json::from_str("\"portable\"").unwrap();
    assert_eq!(parsed, FeaturePriority::Portable);
  }

  #[test]
  fn test_unknown_question() {
    let err = QuizAnswers::from_pairs([("colour", "red")]).unwrap_err();
    assert!(matches!(err, FinderError::UnknownQuestion { ref id } if id == "colour"));
  }

  #[test]
  fn test_from_pairs_complete() {
    let answers = QuizAnswers::from_pairs(full_pairs()).unwrap();
    assert!(answers.is_complete());
    let set = answers.finish().unwrap();
    assert_eq!(set.duty, Duty::Manual);
    assert_eq!(set.battery, BatteryPreference::Manual);
    assert_eq!(set.features, FeaturePriority::Basic);
  }

  #[test]
  fn test_partial_answers_cannot_finish() {
    let answers = QuizAnswers::from_pairs([("duty", "light"), ("battery", "lithium")]).unwrap();
    assert_eq!(answers.missing(), vec![QuestionId::Budget, QuestionId::Volume, QuestionId::Features]);
    match answers.finish().unwrap_err() {
      FinderError::IncompleteAnswers { missing } => assert_eq!(missing, vec!["budget", "volume", "features"]),
      other => panic!("Expected IncompleteAnswers, got: {other:?}"),
    }
  }

  #[test]
  fn test_with_answer_leaves_original_untouched() {
    let empty = QuizAnswers::new();
    let answered = empty.with_answer(QuestionId::Budget, "premium").unwrap();
    assert_eq!(empty.budget, None);
    assert_eq!(answered.answer(QuestionId::Budget), Some("premium"));

    let changed = answered.with_answer(QuestionId::Budget, "flexible").unwrap();
    assert_eq!(changed.budget, Some(Budget::Flexible));
  }

  #[test]
  fn test_progress_flow() {
    let progress = QuizProgress::new();
    assert_eq!(progress.current_question(), QuestionId::Duty);
    assert!(!progress.can_proceed());
    assert_eq!(progress.next(), progress);
    assert_eq!(progress.progress_percent(), 20.0);

    let mut progress = progress;
    for (_, value) in full_pairs() {
      progress = progress.answer(value).unwrap().next();
    }

    assert!(progress.is_finished());
    assert_eq!(progress.step(), 4);
    assert_eq!(progress.progress_percent(), 100.0);
    assert_eq!(progress.result().unwrap().duty, Duty::Manual);
  }

  #[test]
  fn test_progress_back_and_reset() {
    let progress = QuizProgress::new().answer("light").unwrap().next();
    assert_eq!(progress.current_question(), QuestionId::Budget);

    let back = progress.back();
    assert_eq!(back.current_question(), QuestionId::Duty);
    assert!(back.can_proceed());
    assert_eq!(back.back().step(), 0);
    assert!(back.result().is_none());

    assert_eq!(QuizProgress::new(), QuizProgress::default());
  }

  #[test]
  fn test_progress_rejects_invalid_value_for_step() {
    let progress = QuizProgress::new();
    assert!(progress.answer("economy").is_err());
  }
}
