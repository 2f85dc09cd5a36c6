//! Side-by-side comparison tables
//!
//! The first product passed in is the baseline. A row is emitted only when
//! the baseline has the attribute, and numeric rows tag every product as
//! better, worse or equal relative to it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::catalog::Catalog;
use crate::normalize::{normalize, ComparisonData};
use crate::units::{Measure, ValueRange};
use crate::{FinderError, Result};

pub const MIN_PRODUCTS: usize = 2;
pub const MAX_PRODUCTS: usize = 4;

/// One cell of a comparison row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
  Value(String),
  NotApplicable,
}

impl fmt::Display for CellValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CellValue::Value(text) => write!(f, "{text}"),
      CellValue::NotApplicable => write!(f, "N/A"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonTag {
  Better,
  Worse,
  Equal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRow {
  pub attribute_label: String,
  pub values: Vec<CellValue>,
  /// Present for numeric rows only; `None` entries mark products without a value
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags: Option<Vec<Option<ComparisonTag>>>,
  /// Index of the product with the best value on a numeric row; ties go to the earliest
  #[serde(skip_serializing_if = "Option::is_none")]
  pub best: Option<usize>,
  pub is_different: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySection {
  pub category_label: String,
  pub rows: Vec<AttributeRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preference {
  Higher,
  Lower,
}

/// Rendered text plus the number used for tagging
struct Reading {
  text: String,
  number: Option<f64>,
}

type Extract = fn(&ComparisonData) -> Option<Reading>;

struct AttributeDef {
  label: &'static str,
  preference: Option<Preference>,
  extract: Extract,
}

struct SectionDef {
  label: &'static str,
  attributes: Vec<AttributeDef>,
}

fn text(label: &'static str, extract: Extract) -> AttributeDef {
  AttributeDef { label, preference: None, extract }
}

fn numeric(label: &'static str, preference: Preference, extract: Extract) -> AttributeDef {
  AttributeDef { label, preference: Some(preference), extract }
}

fn plain(value: impl ToString) -> Option<Reading> {
  Some(Reading { text: value.to_string(), number: None })
}

fn measure(value: &Option<Measure>) -> Option<Reading> {
  value.as_ref().map(|measure| Reading { text: measure.to_string(), number: Some(measure.value) })
}

fn range(value: &Option<ValueRange>) -> Option<Reading> {
  value.as_ref().and_then(plain)
}

/// A range compared on its upper bound
fn span(value: &Option<ValueRange>) -> Option<Reading> {
  value.as_ref().map(|range| Reading { text: range.to_string(), number: Some(range.max) })
}

fn yes_no(value: bool) -> Option<Reading> {
  plain(if value { "Yes" } else { "No" })
}

fn list(items: &[String]) -> Option<Reading> {
  if items.is_empty() {
    None
  } else {
    plain(items.join(", "))
  }
}

fn section_defs() -> Vec<SectionDef> {
  vec![
    SectionDef {
      label: "System Specifications",
      attributes: vec![
        text("Product Line", |data| plain(data.line.label())),
        text("Application Type", |data| data.system_specs.application_type.as_ref().and_then(plain)),
        text("Dimensions", |data| {
          data.system_specs.dimensions.as_ref().and_then(|d| {
            plain(format!("{} x {} x {} {}", d.length, d.width, d.height, d.unit))
          })
        }),
        numeric("System Weight", Preference::Lower, |data| measure(&data.system_specs.weight)),
        text("Construction", |data| data.system_specs.construction.as_ref().and_then(plain)),
      ],
    },
    SectionDef {
      label: "Flexibility",
      attributes: vec![
        numeric("Pallet Width Range", Preference::Higher, |data| span(&data.flexibility.pallet_width)),
        numeric("Pallet Height Range", Preference::Higher, |data| span(&data.flexibility.pallet_height)),
      ],
    },
    SectionDef {
      label: "Performance",
      attributes: vec![
        numeric("Chain Speed", Preference::Higher, |data| measure(&data.performance.chain_speed)),
        numeric("Chain Length", Preference::Higher, |data| measure(&data.performance.chain_length)),
      ],
    },
    SectionDef {
      label: "Power & Battery",
      attributes: vec![
        text("Battery Type", |data| data.power_battery.battery_type.as_ref().and_then(plain)),
        text("Voltage", |data| data.power_battery.voltage.as_ref().and_then(plain)),
        numeric("Strapping Cycles", Preference::Higher, |data| {
          data.power_battery.strapping_cycles.map(|cycles| Reading {
            text: format!("{cycles} per charge"),
            number: Some(f64::from(cycles)),
          })
        }),
        // ranges compare on their upper bound
        numeric("Charging Time", Preference::Lower, |data| {
          data.power_battery.charge_time.as_ref().map(|time| Reading {
            text: time.to_string(),
            number: Some(time.upper_bound()),
          })
        }),
        numeric("Battery Weight", Preference::Lower, |data| measure(&data.power_battery.weight)),
      ],
    },
    SectionDef {
      label: "Sealing & Strapping",
      attributes: vec![
        numeric("Tension Force", Preference::Higher, |data| span(&data.sealing_strapping.tension_force)),
        text("Strap Width", |data| range(&data.sealing_strapping.strap_width)),
        text("Strap Materials", |data| list(&data.sealing_strapping.strap_materials)),
        text("Sealing Head", |data| data.sealing_strapping.availability.as_ref().and_then(plain)),
      ],
    },
    SectionDef {
      label: "Control & Display",
      attributes: vec![
        text("Interface", |data| data.control_display.interface_type.as_ref().and_then(plain)),
        text("Touchscreen", |data| data.control_display.touchscreen.and_then(yes_no)),
        text("Settings Change", |data| data.control_display.display_type.as_ref().and_then(plain)),
      ],
    },
    SectionDef {
      label: "Safety & Ergonomics",
      attributes: vec![
        text("AGR Certified", |data| yes_no(data.safety_ergonomics.agr_certified)),
        text("ISO 12100:2010", |data| yes_no(data.safety_ergonomics.iso_12100)),
        text("EU Declaration of Conformity", |data| yes_no(data.safety_ergonomics.eu_declaration)),
      ],
    },
    SectionDef {
      label: "Features & Accessories",
      attributes: vec![
        text("Included Accessories", |data| list(&data.features_accessories.included)),
        text("Optional Accessories", |data| list(&data.features_accessories.optional)),
      ],
    },
    SectionDef {
      label: "Environmental",
      attributes: vec![
        text("Operating Temperature", |data| range(&data.environmental.operating_temperature)),
        numeric("Noise Level", Preference::Lower, |data| measure(&data.environmental.noise_level)),
      ],
    },
    SectionDef {
      label: "Maintenance",
      attributes: vec![
        text("Service Interval", |data| data.maintenance.service_interval.as_ref().and_then(plain)),
        text("Warranty", |data| data.maintenance.warranty.as_ref().and_then(plain)),
      ],
    },
  ]
}

fn tag_against(value: f64, baseline: f64, preference: Preference) -> ComparisonTag {
  if value == baseline {
    ComparisonTag::Equal
  } else if (value > baseline) == (preference == Preference::Higher) {
    ComparisonTag::Better
  } else {
    ComparisonTag::Worse
  }
}

fn best_index(readings: &[Option<Reading>], preference: Preference) -> Option<usize> {
  readings
    .iter()
    .enumerate()
    .filter_map(|(index, reading)| Some((index, reading.as_ref()?.number?)))
    .reduce(|best, candidate| {
      let improves = match preference {
        Preference::Higher => candidate.1 > best.1,
        Preference::Lower => candidate.1 < best.1,
      };
      if improves {
        candidate
      } else {
        best
      }
    })
    .map(|(index, _)| index)
}

fn build_row(attribute: &AttributeDef, products: &[ComparisonData]) -> Option<AttributeRow> {
  let readings: Vec<Option<Reading>> = products.iter().map(|data| (attribute.extract)(data)).collect();
  let baseline = readings.first()?.as_ref()?;

  let tags: Option<Vec<Option<ComparisonTag>>> = attribute.preference.map(|preference| {
    readings
      .iter()
      .map(|reading| {
        let value = reading.as_ref()?.number?;
        let base = baseline.number?;
        Some(tag_against(value, base, preference))
      })
      .collect()
  });
  let best = attribute.preference.and_then(|preference| best_index(&readings, preference));

  let values: Vec<CellValue> = readings
    .iter()
    .map(|reading| match reading {
      Some(reading) => CellValue::Value(reading.text.clone()),
      None => CellValue::NotApplicable,
    })
    .collect();
  let is_different = values.iter().any(|value| value != &values[0]);

  Some(AttributeRow { attribute_label: attribute.label.to_string(), values, tags, best, is_different })
}

/// Lay out 2 to 4 normalized products side by side
pub fn build_comparison(products: &[ComparisonData]) -> Result<Vec<CategorySection>> {
  if !(MIN_PRODUCTS..=MAX_PRODUCTS).contains(&products.len()) {
    return Err(FinderError::InvalidSelection { count: products.len() });
  }

  let sections = section_defs()
    .iter()
    .map(|section| CategorySection {
      category_label: section.label.to_string(),
      rows: section.attributes.iter().filter_map(|attribute| build_row(attribute, products)).collect(),
    })
    .collect();

  Ok(sections)
}

/// Resolve catalog keys, normalize and compare them
pub fn compare_models<S: AsRef<str>>(catalog: &Catalog, keys: &[S]) -> Result<Vec<CategorySection>> {
  if !(MIN_PRODUCTS..=MAX_PRODUCTS).contains(&keys.len()) {
    return Err(FinderError::InvalidSelection { count: keys.len() });
  }

  let products = keys
    .iter()
    .map(|key| {
      let key = key.as_ref();
      catalog.get(key).map(normalize).ok_or_else(|| FinderError::unknown_model(key))
    })
    .collect::<Result<Vec<_>>>()?;

  tracing::debug!(products = products.len(), "building comparison");
  build_comparison(&products)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStats {
  pub total: usize,
  pub differences: usize,
  pub similarities: usize,
}

pub fn comparison_stats(sections: &[CategorySection]) -> ComparisonStats {
  sections.iter().flat_map(|section| &section.rows).fold(ComparisonStats::default(), |mut stats, row| {
    stats.total += 1;
    if row.is_different {
      stats.differences += 1;
    } else {
      stats.similarities += 1;
    }
    stats
  })
}

/// Which rows to keep when filtering a comparison
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
  #[default]
  All,
  Differences,
  Similarities,
}

impl FromStr for FilterMode {
  type Err = FinderError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "all" => Ok(FilterMode::All),
      "differences" => Ok(FilterMode::Differences),
      "similarities" => Ok(FilterMode::Similarities),
      other => Err(FinderError::invalid_option("filter", other)),
    }
  }
}

/// Keep the rows matching `mode`, dropping sections left empty
pub fn filter_sections(sections: Vec<CategorySection>, mode: FilterMode) -> Vec<CategorySection> {
  sections
    .into_iter()
    .map(|mut section| {
      section.rows.retain(|row| match mode {
        FilterMode::All => true,
        FilterMode::Differences => row.is_different,
        FilterMode::Similarities => !row.is_different,
      });
      section
    })
    .filter(|section| !section.rows.is_empty())
    .collect()
}
