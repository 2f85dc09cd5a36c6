//! ErgoFinder - Product recommendation and comparison for the ErgoPack catalog
//!
//! Loads the strapping machine catalog, normalizes each product into a fixed
//! comparison schema, ranks products against the "find your model" quiz, and
//! lays out side-by-side comparison tables.

pub mod catalog;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod normalize;
pub mod quiz;
pub mod recommend;
pub mod selection;
pub mod units;

pub use catalog::{load_catalog, Catalog, ProductLine, ProductRecord};
pub use compare::{build_comparison, compare_models, comparison_stats, filter_sections, CategorySection, FilterMode};
pub use config::{FinderConfig, ScoringConfig};
pub use error::{FinderError, Result};
pub use normalize::{normalize, normalize_with_warnings, ComparisonData, NormalizationWarning};
pub use quiz::{questions, AnswerSet, QuestionId, QuizAnswers, QuizProgress};
pub use recommend::{recommend, Recommendation};
pub use selection::ComparisonSelection;
