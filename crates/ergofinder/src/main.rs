use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use ergofinder::cli::commands::{self, Session};
use ergofinder::cli::OutputFormat;
use ergofinder::compare::FilterMode;
use ergofinder::quiz::{AnswerSet, BatteryPreference, Budget, Duty, FeaturePriority, Volume};

#[derive(Parser)]
#[command(name = "ergofinder")]
#[command(about = "ErgoFinder - Find and compare ErgoPack strapping systems")]
#[command(version)]
struct Cli {
  /// Catalog JSON file to use instead of the built-in catalog
  #[arg(long, global = true, value_name = "PATH")]
  catalog: Option<PathBuf>,

  /// Configuration file (default: ./.ergofinder.json, ./ergofinder.json, then the user config dir)
  #[arg(long, global = true, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
  format: OutputFormat,

  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List every model in the catalog
  Models,
  /// Show the quiz questions and their options
  Questions,
  /// Recommend models from quiz answers
  Recommend {
    /// ultra-light, light, medium-heavy, manual or multi-material
    #[arg(long)]
    duty: Duty,
    /// economy, premium or flexible
    #[arg(long)]
    budget: Budget,
    /// lead-fleece, lithium, manual or no-preference
    #[arg(long)]
    battery: BatteryPreference,
    /// low, medium or high
    #[arg(long)]
    volume: Volume,
    /// basic, advanced or portable
    #[arg(long)]
    features: FeaturePriority,
  },
  /// Compare 2 to 4 models side by side
  Compare {
    /// Model keys; the first one is the baseline
    #[arg(required = true, value_name = "MODEL")]
    models: Vec<String>,
    /// Rows to show: all, differences or similarities
    #[arg(long, default_value = "all")]
    filter: FilterMode,
  },
}

fn init_logging(verbose: bool) {
  let filter = if verbose { EnvFilter::new("ergofinder=debug") } else { EnvFilter::new("ergofinder=warn") };

  tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

fn handle(cli: Cli) -> Result<()> {
  if let Command::Questions = cli.command {
    return commands::show_questions(cli.format);
  }

  let session = Session::load(cli.catalog.as_deref(), cli.config.as_deref())?;

  match cli.command {
    Command::Models => commands::list_models(&session, cli.format),
    Command::Questions => commands::show_questions(cli.format),
    Command::Recommend { duty, budget, battery, volume, features } => {
      let answers = AnswerSet { duty, budget, battery, volume, features };
      commands::recommend_products(&session, &answers, cli.format)
    }
    Command::Compare { models, filter } => commands::compare_products(&session, &models, filter, cli.format),
  }
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  handle(cli)
}
