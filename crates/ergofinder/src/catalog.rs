//! Static product catalog
//!
//! The catalog is a JSON object mapping model keys (`"726X"`) to product
//! records. It is validated once at load time: a malformed catalog is a fatal
//! error and never yields partial data. Iteration order is the order in which
//! products appear in the source document, which the recommender relies on
//! for tie-breaking.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::units::{Measure, ValueRange};
use crate::{FinderError, Result};

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

/// Product family used for marketing grouping and scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductLine {
  #[serde(rename = "Economy")]
  Economy,
  #[serde(rename = "X-pert")]
  XPert,
  #[serde(rename = "GO")]
  Go,
  #[serde(rename = "RE")]
  Re,
}

impl ProductLine {
  pub fn label(&self) -> &'static str {
    match self {
      ProductLine::Economy => "Economy Line",
      ProductLine::XPert => "X-pert Line",
      ProductLine::Go => "GO Line",
      ProductLine::Re => "RE Line",
    }
  }
}

impl fmt::Display for ProductLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BatteryChemistry {
  LithiumIon,
  LithiumIronPhosphate,
  LeadFleece,
}

impl BatteryChemistry {
  pub fn is_lithium(&self) -> bool {
    matches!(self, BatteryChemistry::LithiumIon | BatteryChemistry::LithiumIronPhosphate)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
  pub length: f64,
  pub width: f64,
  pub height: f64,
  pub unit: String,
}

/// Battery descriptor; either every field is present or the product has no battery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Battery {
  pub chemistry: BatteryChemistry,
  /// Marketing description, e.g. "24V lead-fleece battery"
  pub description: String,
  pub voltage: String,
  pub strapping_cycles: u32,
  pub charge_time: String,
  /// Battery weight in kg
  pub weight: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SealingHead {
  pub tension_force: Option<String>,
  pub strap_width: Option<String>,
  pub availability: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessoryCategory {
  Included,
  Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Accessory {
  pub name: String,
  pub category: AccessoryCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
  pub operating_temperature: Option<String>,
  pub noise_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaintenanceInfo {
  pub service_interval: Option<String>,
  pub warranty: Option<String>,
}

/// Raw catalog entry as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductRecord {
  /// Model key; taken from the catalog map, not from the record body
  #[serde(skip)]
  pub key: String,
  pub name: String,
  pub line: ProductLine,
  pub application_type: String,
  pub dimensions: Dimensions,
  pub weight: Measure,
  pub pallet_width: ValueRange,
  pub pallet_height: ValueRange,
  pub chain_speed: String,
  pub chain_length: String,
  pub control: String,
  pub settings_change: String,
  pub battery: Option<Battery>,
  pub sealing_head: Option<SealingHead>,
  #[serde(default)]
  pub strap_materials: Vec<String>,
  #[serde(default)]
  pub accessories: Vec<Accessory>,
  #[serde(default)]
  pub certifications: Vec<String>,
  #[serde(default)]
  pub has_advanced_controls: bool,
  pub construction: Option<String>,
  pub environment: Option<Environment>,
  pub maintenance: Option<MaintenanceInfo>,
}

impl ProductRecord {
  pub fn strapping_cycles(&self) -> Option<u32> {
    self.battery.as_ref().map(|battery| battery.strapping_cycles)
  }

  pub fn has_certification(&self, name: &str) -> bool {
    self.certifications.iter().any(|cert| cert == name)
  }
}

/// Ordered, validated product collection
#[derive(Debug, Clone)]
pub struct Catalog {
  products: Vec<ProductRecord>,
}

impl Catalog {
  /// Parse and validate a catalog document
  pub fn from_json(json: &str) -> Result<Self> {
    let entries: CatalogEntries =
      serde_json::from_str(json).map_err(|e| FinderError::catalog_parse(e.to_string()))?;

    let records = entries
      .0
      .into_iter()
      .map(|(key, mut record)| {
        record.key = key;
        record
      })
      .collect();

    Self::from_records(records)
  }

  /// Load a catalog document from disk
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let content = std::fs::read_to_string(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), "loading catalog from file");
    Self::from_json(&content)
  }

  /// Build a catalog from records whose `key` is already set
  pub fn from_records(products: Vec<ProductRecord>) -> Result<Self> {
    validate(&products)?;
    tracing::debug!(products = products.len(), "catalog loaded");
    Ok(Self { products })
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  pub fn get(&self, key: &str) -> Option<&ProductRecord> {
    self.products.iter().find(|product| product.key == key)
  }

  /// Products in catalog order
  pub fn iter(&self) -> impl Iterator<Item = &ProductRecord> {
    self.products.iter()
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.products.iter().map(|product| product.key.as_str())
  }
}

/// Load the catalog compiled into the crate
pub fn load_catalog() -> Result<Catalog> {
  Catalog::from_json(EMBEDDED_CATALOG)
}

fn validate(products: &[ProductRecord]) -> Result<()> {
  if products.is_empty() {
    return Err(FinderError::EmptyCatalog);
  }

  let mut seen = HashSet::new();
  for product in products {
    if product.key.trim().is_empty() {
      return Err(FinderError::EmptyModelKey);
    }
    if !seen.insert(product.key.as_str()) {
      return Err(FinderError::duplicate_model(&product.key));
    }

    check_range(&product.key, "palletWidth", &product.pallet_width)?;
    check_range(&product.key, "palletHeight", &product.pallet_height)?;
  }

  Ok(())
}

fn check_range(key: &str, field: &str, range: &ValueRange) -> Result<()> {
  if range.min > range.max {
    return Err(FinderError::inverted_range(key, field, range.min, range.max));
  }
  Ok(())
}

/// Map entries in document order, duplicates included
struct CatalogEntries(Vec<(String, ProductRecord)>);

impl<'de> Deserialize<'de> for CatalogEntries {
  fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
      type Value = CatalogEntries;

      fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of model keys to product records")
      }

      fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
      where
        A: MapAccess<'de>,
      {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
          let record: ProductRecord = map
            .next_value()
            .map_err(|e| <A::Error as de::Error>::custom(format!("product '{key}': {e}")))?;
          entries.push((key, record));
        }
        Ok(CatalogEntries(entries))
      }
    }

    deserializer.deserialize_map(EntriesVisitor)
  }
}

#[cfg(test)]
pub(crate) fn sample_record(key: &str) -> ProductRecord {
  ProductRecord {
    key: key.to_string(),
    name: format!("ErgoPack {key}"),
    line: ProductLine::Economy,
    application_type: "Light-Duty".to_string(),
    dimensions: Dimensions { length: 630.0, width: 770.0, height: 1200.0, unit: "mm".to_string() },
    weight: Measure::new(88.1, "kg"),
    pallet_width: ValueRange { min: 30.0, max: 255.0, unit: "cm".to_string() },
    pallet_height: ValueRange { min: 10.0, max: 230.0, unit: "cm".to_string() },
    chain_speed: "40m/min".to_string(),
    chain_length: "6m".to_string(),
    control: "Electrically via joystick".to_string(),
    settings_change: "With pin".to_string(),
    battery: Some(Battery {
      chemistry: BatteryChemistry::LeadFleece,
      description: "24V lead-fleece battery".to_string(),
      voltage: "24V".to_string(),
      strapping_cycles: 350,
      charge_time: "8-10 hours".to_string(),
      weight: 12.3,
    }),
    sealing_head: None,
    strap_materials: vec!["Polypropylene (PP)".to_string(), "Polyester (PET)".to_string()],
    accessories: vec![],
    certifications: vec!["AGR Certified".to_string()],
    has_advanced_controls: false,
    construction: None,
    environment: None,
    maintenance: None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL_RECORD: &str = r#"{
    "name": "ErgoPack 700",
    "line": "Economy",
    "applicationType": "Manual Operation",
    "dimensions": { "length": 630, "width": 770, "height": 1200, "unit": "mm" },
    "weight": { "value": 64.4, "unit": "kg" },
    "palletWidth": { "min": 30, "max": 255, "unit": "cm" },
    "palletHeight": { "min": 10, "max": 230, "unit": "cm" },
    "chainSpeed": "Hand Crank",
    "chainLength": "6m",
    "control": "Hand Crank",
    "settingsChange": "With pin"
  }"#;

  #[test]
  fn test_embedded_catalog_loads() {
    let catalog = load_catalog().unwrap();
    assert!(!catalog.is_empty());
    assert!(catalog.get("700").is_some());
    assert!(catalog.get("726X").is_some());
    assert!(catalog.get("GO").is_some());
    assert!(catalog.get("RE").is_some());
  }

  #[test]
  fn test_embedded_catalog_battery_consistency() {
    let catalog = load_catalog().unwrap();
    let manual = catalog.get("700").unwrap();
    assert!(manual.battery.is_none());
    assert_eq!(manual.application_type, "Manual Operation");

    let xpert = catalog.get("700X").unwrap();
    assert_eq!(xpert.strapping_cycles(), Some(1200));
    assert_eq!(xpert.battery.as_ref().unwrap().chemistry, BatteryChemistry::LithiumIon);
  }

  #[test]
  fn test_catalog_preserves_document_order() {
    let json = format!(r#"{{ "B": {MINIMAL_RECORD}, "A": {MINIMAL_RECORD}, "C": {MINIMAL_RECORD} }}"#);
    let catalog = Catalog::from_json(&json).unwrap();
    let keys: Vec<&str> = catalog.keys().collect();
    assert_eq!(keys, vec!["B", "A", "C"]);
  }

  #[test]
  fn test_minimal_record_defaults() {
    let json = format!(r#"{{ "700": {MINIMAL_RECORD} }}"#);
    let catalog = Catalog::from_json(&json).unwrap();
    let record = catalog.get("700").unwrap();
    assert_eq!(record.key, "700");
    assert!(record.battery.is_none());
    assert!(record.sealing_head.is_none());
    assert!(record.accessories.is_empty());
    assert!(!record.has_advanced_controls);
  }

  #[test]
  fn test_duplicate_key_rejected() {
    let json = format!(r#"{{ "700": {MINIMAL_RECORD}, "700": {MINIMAL_RECORD} }}"#);
    let err = Catalog::from_json(&json).unwrap_err();
    assert!(matches!(err, FinderError::DuplicateModel { ref key } if key == "700"));
  }

  #[test]
  fn test_empty_catalog_rejected() {
    let err = Catalog::from_json("{}").unwrap_err();
    assert!(matches!(err, FinderError::EmptyCatalog));
  }

  #[test]
  fn test_empty_key_rejected() {
    let json = format!(r#"{{ " ": {MINIMAL_RECORD} }}"#);
    let err = Catalog::from_json(&json).unwrap_err();
    assert!(matches!(err, FinderError::EmptyModelKey));
  }

  #[test]
  fn test_missing_required_field_rejected() {
    let json = r#"{ "700": { "name": "ErgoPack 700", "line": "Economy" } }"#;
    let err = Catalog::from_json(json).unwrap_err();
    match err {
      FinderError::CatalogParse { message } => {
        assert!(message.contains("700"));
        assert!(message.contains("missing field"));
      }
      other => panic!("Expected CatalogParse error, got: {other:?}"),
    }
  }

  #[test]
  fn test_partial_battery_rejected() {
    let record = MINIMAL_RECORD.replacen(
      "\"control\"",
      r#""battery": { "chemistry": "lithium-ion", "voltage": "36.3V" }, "control""#,
      1,
    );
    let json = format!(r#"{{ "700X": {record} }}"#);
    let err = Catalog::from_json(&json).unwrap_err();
    assert!(matches!(err, FinderError::CatalogParse { .. }));
  }

  #[test]
  fn test_unknown_line_rejected() {
    let record = MINIMAL_RECORD.replace("\"Economy\"", "\"Deluxe\"");
    let json = format!(r#"{{ "700": {record} }}"#);
    assert!(Catalog::from_json(&json).is_err());
  }

  #[test]
  fn test_inverted_range_rejected() {
    let record = MINIMAL_RECORD.replace(r#""min": 30, "max": 255"#, r#""min": 300, "max": 255"#);
    let json = format!(r#"{{ "700": {record} }}"#);
    let err = Catalog::from_json(&json).unwrap_err();
    match err {
      FinderError::InvertedRange { key, field, min, max } => {
        assert_eq!(key, "700");
        assert_eq!(field, "palletWidth");
        assert_eq!(min, 300.0);
        assert_eq!(max, 255.0);
      }
      other => panic!("Expected InvertedRange error, got: {other:?}"),
    }
  }

  #[test]
  fn test_not_a_map_rejected() {
    let err = Catalog::from_json("[1, 2, 3]").unwrap_err();
    assert!(err.is_catalog_error());
  }

  #[test]
  fn test_from_records_validates() {
    let records = vec![sample_record("700E"), sample_record("700E")];
    assert!(matches!(Catalog::from_records(records), Err(FinderError::DuplicateModel { .. })));

    let catalog = Catalog::from_records(vec![sample_record("700E"), sample_record("726E")]).unwrap();
    assert_eq!(catalog.len(), 2);
  }

  #[test]
  fn test_has_certification() {
    let record = sample_record("700E");
    assert!(record.has_certification("AGR Certified"));
    assert!(!record.has_certification("AGR"));
  }
}
