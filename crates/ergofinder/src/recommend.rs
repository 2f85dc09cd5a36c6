//! Quiz-driven product recommendation
//!
//! Each product earns points from five independent signals, evaluated in a
//! fixed order (duty, budget, battery, volume, features). Each signal is an
//! exact match between one answer and one product attribute. Products that
//! earn nothing are dropped. The rest are ranked by score, and ties keep
//! catalog order.

use serde::Serialize;

use crate::catalog::{BatteryChemistry, Catalog, ProductLine, ProductRecord};
use crate::config::ScoringConfig;
use crate::quiz::{AnswerSet, BatteryPreference, Budget, Duty, FeaturePriority, Volume};

/// One ranked product with the reasons it was picked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  pub product_key: String,
  pub score: u32,
  pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
  Duty,
  Budget,
  Battery,
  Volume,
  Features,
}

/// A signal that fired for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalMatch {
  pub signal: Signal,
  pub points: u32,
  pub reason: &'static str,
}

/// Application type a duty answer maps to
pub fn application_type_for(duty: Duty) -> &'static str {
  match duty {
    Duty::UltraLight => "Ultra-Light-Duty",
    Duty::Light => "Light-Duty",
    Duty::MediumHeavy => "Medium/Heavy-Duty",
    Duty::Manual => "Manual Operation",
    Duty::MultiMaterial => "Multi-Material",
  }
}

fn duty_signal(record: &ProductRecord, duty: Duty, config: &ScoringConfig) -> Option<SignalMatch> {
  if record.application_type != application_type_for(duty) {
    return None;
  }

  let reason = match duty {
    Duty::UltraLight => "Perfect match for ultra-light-duty applications",
    Duty::Light => "Ideal for light-duty packaging",
    Duty::MediumHeavy => "Built for medium to heavy-duty operations",
    Duty::Manual => "Manual hand-crank operation as requested",
    Duty::MultiMaterial => "Supports multiple strap material types",
  };
  Some(SignalMatch { signal: Signal::Duty, points: config.duty_points, reason })
}

fn budget_signal(record: &ProductRecord, budget: Budget, config: &ScoringConfig) -> Option<SignalMatch> {
  let reason = match (budget, record.line) {
    (Budget::Economy, ProductLine::Economy) => "Economy line offers best value",
    (Budget::Premium, ProductLine::XPert) => "Premium X-pert line with advanced features",
    _ => return None,
  };
  Some(SignalMatch { signal: Signal::Budget, points: config.budget_points, reason })
}

/// Battery chemistry against the stated preference
///
/// `lithium` is a chemistry family, not an exact battery type: it matches
/// lithium-iron-phosphate packs (726XLFP) as well as lithium-ion ones.
fn battery_signal(
  record: &ProductRecord,
  preference: BatteryPreference,
  config: &ScoringConfig,
) -> Option<SignalMatch> {
  let chemistry = record.battery.as_ref().map(|battery| battery.chemistry);
  let reason = match (preference, chemistry) {
    (BatteryPreference::Lithium, Some(chemistry)) if chemistry.is_lithium() => {
      "Lithium-Ion battery: lighter, faster charging"
    }
    (BatteryPreference::LeadFleece, Some(BatteryChemistry::LeadFleece)) => {
      "Proven lead-fleece battery technology"
    }
    (BatteryPreference::Manual, None) => "No battery needed - manual operation",
    _ => return None,
  };
  Some(SignalMatch { signal: Signal::Battery, points: config.battery_points, reason })
}

fn volume_signal(record: &ProductRecord, volume: Volume, config: &ScoringConfig) -> Option<SignalMatch> {
  let cycles = record.strapping_cycles();
  let (points, reason) = match volume {
    Volume::High if cycles.is_some_and(|cycles| cycles >= config.high_volume_cycles) => {
      (config.high_volume_points, "High capacity for heavy use")
    }
    Volume::Medium if cycles.is_some_and(|cycles| cycles >= config.medium_volume_cycles) => {
      (config.medium_volume_points, "Good capacity for regular use")
    }
    Volume::Low => (config.low_volume_points, "Suitable for occasional use"),
    _ => return None,
  };
  Some(SignalMatch { signal: Signal::Volume, points, reason })
}

fn features_signal(
  record: &ProductRecord,
  features: FeaturePriority,
  config: &ScoringConfig,
) -> Option<SignalMatch> {
  let (points, reason) = match features {
    FeaturePriority::Advanced if record.has_advanced_controls => {
      (config.advanced_feature_points, "Advanced touchscreen and laser positioning")
    }
    FeaturePriority::Portable if config.is_portable(&record.key) => {
      (config.portable_feature_points, "Premium mobile strapping solution")
    }
    FeaturePriority::Basic if record.line == ProductLine::Economy => {
      (config.basic_feature_points, "Simple, reliable operation")
    }
    _ => return None,
  };
  Some(SignalMatch { signal: Signal::Features, points, reason })
}

/// Every signal that fires for `record`, in evaluation order
pub fn match_signals(record: &ProductRecord, answers: &AnswerSet, config: &ScoringConfig) -> Vec<SignalMatch> {
  [
    duty_signal(record, answers.duty, config),
    budget_signal(record, answers.budget, config),
    battery_signal(record, answers.battery, config),
    volume_signal(record, answers.volume, config),
    features_signal(record, answers.features, config),
  ]
  .into_iter()
  .flatten()
  .collect()
}

pub fn score(record: &ProductRecord, answers: &AnswerSet, config: &ScoringConfig) -> u32 {
  match_signals(record, answers, config).iter().map(|signal| signal.points).sum()
}

/// Rank the catalog against a complete answer set
///
/// Returns at most `config.max_results` entries, best first. Equal scores
/// keep catalog order. An empty result means nothing matched.
pub fn recommend(catalog: &Catalog, answers: &AnswerSet, config: &ScoringConfig) -> Vec<Recommendation> {
  let mut candidates: Vec<(usize, Recommendation)> = catalog
    .iter()
    .enumerate()
    .filter_map(|(index, record)| {
      let matches = match_signals(record, answers, config);
      let score: u32 = matches.iter().map(|signal| signal.points).sum();
      tracing::trace!(model = %record.key, score, signals = matches.len(), "scored product");

      if score == 0 {
        return None;
      }

      let reasons =
        matches.iter().take(config.max_reasons).map(|signal| signal.reason.to_string()).collect();
      Some((index, Recommendation { product_key: record.key.clone(), score, reasons }))
    })
    .collect();

  candidates.sort_by(|(index_a, a), (index_b, b)| b.score.cmp(&a.score).then(index_a.cmp(index_b)));
  candidates.truncate(config.max_results);

  tracing::debug!(results = candidates.len(), "recommendations ready");
  candidates.into_iter().map(|(_, recommendation)| recommendation).collect()
}
