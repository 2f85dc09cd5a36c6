//! Display formatting utilities for CLI output

use colored::*;

use crate::catalog::Catalog;
use crate::cli::commands::ModelSummary;
use crate::compare::{AttributeRow, CategorySection, CellValue, ComparisonStats, ComparisonTag};
use crate::quiz::Question;
use crate::recommend::Recommendation;

const LABEL_WIDTH: usize = 30;
const COLUMN_WIDTH: usize = 24;

pub fn print_models(models: &[ModelSummary]) {
  println!("{}", "ErgoPack product catalog".bold());
  println!();
  for model in models {
    println!(
      "  {:<10} {:<20} {:<14} {}",
      model.key.cyan(),
      model.name,
      model.line.label(),
      model.application_type.dimmed()
    );
  }
  println!();
  println!("{} models", models.len());
}

pub fn print_questions(questions: &[Question]) {
  for (index, question) in questions.iter().enumerate() {
    println!("{} {}", format!("{}.", index + 1).bold(), question.prompt.bold());
    println!("   {} --{}", "flag:".dimmed(), question.id);
    for option in &question.options {
      println!("   {:<16} {} {}", option.value.cyan(), option.label, format!("({})", option.description).dimmed());
    }
    println!();
  }
}

pub fn print_recommendations(recommendations: &[Recommendation], catalog: &Catalog) {
  if recommendations.is_empty() {
    println!("{}", "No matching products found. Try relaxing some of your answers.".yellow());
    return;
  }

  println!("{}", "Recommended models".bold());
  println!();
  for (rank, recommendation) in recommendations.iter().enumerate() {
    let name = catalog.get(&recommendation.product_key).map(|record| record.name.as_str()).unwrap_or_default();
    println!(
      "{} {} {} {}",
      format!("{}.", rank + 1).bold(),
      recommendation.product_key.cyan().bold(),
      name,
      format!("(score {})", recommendation.score).green()
    );
    for reason in &recommendation.reasons {
      println!("   {} {}", "✓".green(), reason);
    }
  }
}

fn truncate(text: &str, width: usize) -> String {
  if text.chars().count() <= width {
    return text.to_string();
  }
  let kept: String = text.chars().take(width.saturating_sub(1)).collect();
  format!("{kept}…")
}

fn render_cell(row: &AttributeRow, index: usize) -> String {
  let text = truncate(&row.values[index].to_string(), COLUMN_WIDTH - 2);
  let padded = format!("{text:<width$}", width = COLUMN_WIDTH);
  let tag = row.tags.as_ref().and_then(|tags| tags.get(index).copied().flatten());

  let padded = if row.best == Some(index) && row.is_different { padded.bold() } else { padded.normal() };

  match tag {
    Some(ComparisonTag::Better) => padded.green().to_string(),
    Some(ComparisonTag::Worse) => padded.red().to_string(),
    _ if row.values[index] == CellValue::NotApplicable => padded.dimmed().to_string(),
    _ => padded.to_string(),
  }
}

pub fn print_comparison(catalog: &Catalog, keys: &[String], sections: &[CategorySection], stats: &ComparisonStats) {
  let header: String = keys
    .iter()
    .map(|key| {
      let name = catalog.get(key).map(|record| record.name.as_str()).unwrap_or(key);
      format!("{:<width$}", truncate(name, COLUMN_WIDTH - 2), width = COLUMN_WIDTH)
    })
    .collect();
  let total_width = LABEL_WIDTH + COLUMN_WIDTH * keys.len();

  println!("{:<width$}{}", "", header.bold(), width = LABEL_WIDTH);
  println!("{}", "=".repeat(total_width));

  for section in sections {
    println!("{}", section.category_label.purple().bold());
    for row in &section.rows {
      let cells: String = (0..row.values.len()).map(|index| render_cell(row, index)).collect();
      let marker = if row.is_different { "*" } else { " " };
      println!("{marker} {:<width$}{cells}", truncate(&row.attribute_label, LABEL_WIDTH - 3), width = LABEL_WIDTH - 2);
    }
    println!();
  }

  println!("{}", "-".repeat(total_width));
  println!(
    "{} rows compared: {} different, {} identical",
    stats.total,
    stats.differences.to_string().yellow(),
    stats.similarities.to_string().green()
  );
  println!("{}", "* values differ; green is better and red is worse than the first model, bold is the best".dimmed());
}
