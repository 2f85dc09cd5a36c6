//! Command-line front end
//!
//! Thin layer over the library: resolves the catalog and configuration,
//! calls the core functions and prints their results.

pub mod commands;
pub mod display;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  /// Colored, human-readable output
  #[default]
  Pretty,
  /// JSON on stdout
  Json,
}
