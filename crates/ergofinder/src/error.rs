//! Error types shared across the catalog, quiz and comparison modules

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
  #[error("Failed to parse catalog: {message}")]
  CatalogParse { message: String },

  #[error("Duplicate model key '{key}' in catalog")]
  DuplicateModel { key: String },

  #[error("Catalog contains a product with an empty model key")]
  EmptyModelKey,

  #[error("Model '{key}' has an inverted {field} range: {min} > {max}")]
  InvertedRange { key: String, field: String, min: f64, max: f64 },

  #[error("Catalog contains no products")]
  EmptyCatalog,

  #[error("Comparison needs between 2 and 4 products, got {count}")]
  InvalidSelection { count: usize },

  #[error("Model '{key}' is already selected")]
  AlreadySelected { key: String },

  #[error("Unknown model '{key}'")]
  UnknownModel { key: String },

  #[error("Unknown quiz question '{id}'")]
  UnknownQuestion { id: String },

  #[error("'{value}' is not a valid option for question '{question}'")]
  InvalidOption { question: String, value: String },

  #[error("Quiz is incomplete, unanswered: {}", missing.join(", "))]
  IncompleteAnswers { missing: Vec<String> },

  #[error("Invalid configuration: {message}")]
  Config { message: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

impl FinderError {
  pub fn catalog_parse(message: impl Into<String>) -> Self {
    Self::CatalogParse { message: message.into() }
  }

  pub fn duplicate_model(key: impl Into<String>) -> Self {
    Self::DuplicateModel { key: key.into() }
  }

  pub fn inverted_range(key: impl Into<String>, field: impl Into<String>, min: f64, max: f64) -> Self {
    Self::InvertedRange { key: key.into(), field: field.into(), min, max }
  }

  pub fn unknown_model(key: impl Into<String>) -> Self {
    Self::UnknownModel { key: key.into() }
  }

  pub fn invalid_option(question: impl Into<String>, value: impl Into<String>) -> Self {
    Self::InvalidOption { question: question.into(), value: value.into() }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }

  /// True for the fatal errors raised while loading a catalog
  pub fn is_catalog_error(&self) -> bool {
    matches!(
      self,
      Self::CatalogParse { .. }
        | Self::DuplicateModel { .. }
        | Self::EmptyModelKey
        | Self::InvertedRange { .. }
        | Self::EmptyCatalog
    )
  }
}

pub type Result<T> = std::result::Result<T, FinderError>;
