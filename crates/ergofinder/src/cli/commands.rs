use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::catalog::{load_catalog, Catalog, ProductLine};
use crate::cli::display;
use crate::cli::OutputFormat;
use crate::compare::{compare_models, comparison_stats, filter_sections, CategorySection, ComparisonStats, FilterMode};
use crate::config::FinderConfig;
use crate::quiz::{questions, AnswerSet};
use crate::recommend::recommend;

/// Catalog and configuration resolved for one invocation
pub struct Session {
  pub catalog: Catalog,
  pub config: FinderConfig,
}

impl Session {
  /// Resolve configuration, then the catalog: `--catalog`, the configured path, or the built-in one
  pub fn load(catalog_path: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
    let config = match config_path {
      Some(path) => FinderConfig::load_from_file(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?,
      None => FinderConfig::load().context("Failed to load config")?,
    };

    let catalog = match catalog_path.or(config.catalog_path.as_deref()) {
      Some(path) => Catalog::load_from_file(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
      None => load_catalog().context("Built-in catalog is invalid")?,
    };

    Ok(Self { catalog, config })
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary<'a> {
  pub key: &'a str,
  pub name: &'a str,
  pub line: ProductLine,
  pub application_type: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ComparisonReport {
  pub models: Vec<String>,
  pub stats: ComparisonStats,
  pub sections: Vec<CategorySection>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("Failed to serialize output")?);
  Ok(())
}

pub fn list_models(session: &Session, format: OutputFormat) -> Result<()> {
  let models: Vec<ModelSummary> = session
    .catalog
    .iter()
    .map(|record| ModelSummary {
      key: &record.key,
      name: &record.name,
      line: record.line,
      application_type: &record.application_type,
    })
    .collect();

  match format {
    OutputFormat::Json => print_json(&models),
    OutputFormat::Pretty => {
      display::print_models(&models);
      Ok(())
    }
  }
}

pub fn show_questions(format: OutputFormat) -> Result<()> {
  let questions = questions();
  match format {
    OutputFormat::Json => print_json(&questions),
    OutputFormat::Pretty => {
      display::print_questions(&questions);
      Ok(())
    }
  }
}

pub fn recommend_products(session: &Session, answers: &AnswerSet, format: OutputFormat) -> Result<()> {
  let recommendations = recommend(&session.catalog, answers, &session.config.scoring);

  match format {
    OutputFormat::Json => print_json(&recommendations),
    OutputFormat::Pretty => {
      display::print_recommendations(&recommendations, &session.catalog);
      Ok(())
    }
  }
}

pub fn compare_products(session: &Session, keys: &[String], filter: FilterMode, format: OutputFormat) -> Result<()> {
  let sections = compare_models(&session.catalog, keys).context("Cannot compare the selected models")?;
  let stats = comparison_stats(&sections);
  let sections = filter_sections(sections, filter);

  match format {
    OutputFormat::Json => print_json(&ComparisonReport { models: keys.to_vec(), stats, sections }),
    OutputFormat::Pretty => {
      display::print_comparison(&session.catalog, keys, &sections, &stats);
      Ok(())
    }
  }
}
