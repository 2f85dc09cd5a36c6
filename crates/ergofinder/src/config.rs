//! Configuration management for ergofinder
//!
//! Holds the recommender's point awards, volume thresholds and result limits,
//! plus an optional path to an external catalog document.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{FinderError, Result};

const CONFIG_FILE_NAMES: [&str; 2] = [".ergofinder.json", "ergofinder.json"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinderConfig {
  #[serde(default)]
  pub scoring: ScoringConfig,
  /// Catalog document to use instead of the embedded one
  #[serde(default)]
  pub catalog_path: Option<PathBuf>,
}

/// Point awards and limits used by the recommender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
  #[serde(default = "default_duty_points")]
  pub duty_points: u32,
  #[serde(default = "default_budget_points")]
  pub budget_points: u32,
  #[serde(default = "default_battery_points")]
  pub battery_points: u32,
  #[serde(default = "default_volume_points")]
  pub high_volume_points: u32,
  #[serde(default = "default_volume_points")]
  pub medium_volume_points: u32,
  #[serde(default = "default_low_volume_points")]
  pub low_volume_points: u32,
  /// Minimum strapping cycles per charge for high volume
  #[serde(default = "default_high_volume_cycles")]
  pub high_volume_cycles: u32,
  /// Minimum strapping cycles per charge for medium volume
  #[serde(default = "default_medium_volume_cycles")]
  pub medium_volume_cycles: u32,
  #[serde(default = "default_advanced_feature_points")]
  pub advanced_feature_points: u32,
  #[serde(default = "default_portable_feature_points")]
  pub portable_feature_points: u32,
  #[serde(default = "default_basic_feature_points")]
  pub basic_feature_points: u32,
  /// How many recommendations to return
  #[serde(default = "default_max_results")]
  pub max_results: usize,
  /// How many reasons to keep per recommendation
  #[serde(default = "default_max_reasons")]
  pub max_reasons: usize,
  /// Models that count as portable
  #[serde(default = "default_portable_models")]
  pub portable_models: Vec<String>,
}

// Default award functions
fn default_duty_points() -> u32 {
  30
}
fn default_budget_points() -> u32 {
  25
}
fn default_battery_points() -> u32 {
  20
}
fn default_volume_points() -> u32 {
  15
}
fn default_low_volume_points() -> u32 {
  10
}
fn default_high_volume_cycles() -> u32 {
  1000
}
fn default_medium_volume_cycles() -> u32 {
  350
}
fn default_advanced_feature_points() -> u32 {
  15
}
fn default_portable_feature_points() -> u32 {
  20
}
fn default_basic_feature_points() -> u32 {
  10
}
fn default_max_results() -> usize {
  3
}
fn default_max_reasons() -> usize {
  3
}
fn default_portable_models() -> Vec<String> {
  vec!["RE".to_string(), "GO".to_string()]
}

impl Default for ScoringConfig {
  fn default() -> Self {
    Self {
      duty_points: default_duty_points(),
      budget_points: default_budget_points(),
      battery_points: default_battery_points(),
      high_volume_points: default_volume_points(),
      medium_volume_points: default_volume_points(),
      low_volume_points: default_low_volume_points(),
      high_volume_cycles: default_high_volume_cycles(),
      medium_volume_cycles: default_medium_volume_cycles(),
      advanced_feature_points: default_advanced_feature_points(),
      portable_feature_points: default_portable_feature_points(),
      basic_feature_points: default_basic_feature_points(),
      max_results: default_max_results(),
      max_reasons: default_max_reasons(),
      portable_models: default_portable_models(),
    }
  }
}

impl ScoringConfig {
  pub fn is_portable(&self, key: &str) -> bool {
    self.portable_models.iter().any(|model| model == key)
  }
}

impl FinderConfig {
  /// Load configuration from a file
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path)?;
    let config: FinderConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load configuration from the current directory, the user config dir, or defaults
  pub fn load() -> Result<Self> {
    for path in &CONFIG_FILE_NAMES {
      if Path::new(path).exists() {
        tracing::debug!(path, "using config file");
        return Self::load_from_file(path);
      }
    }

    if let Some(path) = user_config_path() {
      if path.exists() {
        tracing::debug!(path = %path.display(), "using user config file");
        return Self::load_from_file(path);
      }
    }

    // No config file found, use defaults
    Ok(FinderConfig::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  pub fn validate(&self) -> Result<()> {
    if self.scoring.max_results == 0 {
      return Err(FinderError::config("scoring.max_results must be at least 1"));
    }
    if self.scoring.max_reasons == 0 {
      return Err(FinderError::config("scoring.max_reasons must be at least 1"));
    }
    if self.scoring.medium_volume_cycles > self.scoring.high_volume_cycles {
      return Err(FinderError::config(
        "scoring.medium_volume_cycles cannot exceed scoring.high_volume_cycles",
      ));
    }
    Ok(())
  }
}

fn user_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|dir| dir.join("ergofinder").join("config.json"))
}
