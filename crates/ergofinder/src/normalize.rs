//! Normalization of raw product records into the comparison schema
//!
//! `ComparisonData` has a fixed set of ten sections. Every section is always
//! present; each field inside it is optional. A field whose free text fails
//! to parse is omitted and reported as a [`NormalizationWarning`], it is
//! never defaulted to zero. Units are attached literally and never converted.

use serde::Serialize;
use std::fmt;

use crate::catalog::{AccessoryCategory, BatteryChemistry, Catalog, Dimensions, ProductLine, ProductRecord};
use crate::units::{parse_quantity, parse_range, Measure, ValueRange};

pub const AGR_CERTIFICATION: &str = "AGR Certified";
pub const ISO_12100_CERTIFICATION: &str = "ISO 12100:2010";
pub const EU_DECLARATION: &str = "EU Declaration of Conformity";

const SPEED_UNITS: &[&str] = &["m/min"];
const LENGTH_UNITS: &[&str] = &["m"];
const HOUR_UNITS: &[&str] = &["hours", "hour", "h"];
const VOLTAGE_UNITS: &[&str] = &["V"];
const FORCE_UNITS: &[&str] = &["daN"];
const WIDTH_UNITS: &[&str] = &["mm"];
const TEMPERATURE_UNITS: &[&str] = &["°C"];
const NOISE_UNITS: &[&str] = &["dB(A)"];

/// A field that could not be parsed and was left out of the normalized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationWarning {
  pub model: String,
  pub field: &'static str,
  pub raw: String,
}

impl fmt::Display for NormalizationWarning {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: could not parse {} from '{}', field omitted", self.model, self.field, self.raw)
  }
}

/// Charging time is authored either as one value or as a range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChargeTime {
  Single(Measure),
  Range(ValueRange),
}

impl ChargeTime {
  /// Worst case, used when comparing products
  pub fn upper_bound(&self) -> f64 {
    match self {
      ChargeTime::Single(measure) => measure.value,
      ChargeTime::Range(range) => range.max,
    }
  }
}

impl fmt::Display for ChargeTime {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChargeTime::Single(measure) => write!(f, "{measure}"),
      ChargeTime::Range(range) => write!(f, "{}-{} {}", range.min, range.max, range.unit),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSpecs {
  pub application_type: Option<String>,
  pub dimensions: Option<Dimensions>,
  pub weight: Option<Measure>,
  pub construction: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flexibility {
  pub pallet_width: Option<ValueRange>,
  pub pallet_height: Option<ValueRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
  pub chain_speed: Option<Measure>,
  pub chain_length: Option<Measure>,
  pub operation_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBattery {
  pub battery_type: Option<String>,
  pub chemistry: Option<BatteryChemistry>,
  pub weight: Option<Measure>,
  pub charge_time: Option<ChargeTime>,
  pub voltage: Option<Measure>,
  pub strapping_cycles: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SealingStrapping {
  pub tension_force: Option<ValueRange>,
  pub strap_width: Option<ValueRange>,
  pub strap_materials: Vec<String>,
  pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlDisplay {
  pub interface_type: Option<String>,
  pub touchscreen: Option<bool>,
  pub display_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyErgonomics {
  pub certifications: Vec<String>,
  pub agr_certified: bool,
  pub iso_12100: bool,
  pub eu_declaration: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesAccessories {
  pub included: Vec<String>,
  pub optional: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environmental {
  pub operating_temperature: Option<ValueRange>,
  pub noise_level: Option<Measure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
  pub service_interval: Option<String>,
  pub warranty: Option<String>,
}

/// Uniform, comparable view of one product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonData {
  pub model: String,
  pub name: String,
  pub line: ProductLine,
  pub system_specs: SystemSpecs,
  pub flexibility: Flexibility,
  pub performance: Performance,
  pub power_battery: PowerBattery,
  pub sealing_strapping: SealingStrapping,
  pub control_display: ControlDisplay,
  pub safety_ergonomics: SafetyErgonomics,
  pub features_accessories: FeaturesAccessories,
  pub environmental: Environmental,
  pub maintenance: Maintenance,
}

/// Parses free-text fields of one record and remembers what it had to drop
struct FieldParser<'a> {
  model: &'a str,
  warnings: Vec<NormalizationWarning>,
}

impl<'a> FieldParser<'a> {
  fn new(model: &'a str) -> Self {
    Self { model, warnings: Vec::new() }
  }

  fn omit(&mut self, field: &'static str, raw: &str) {
    tracing::warn!(model = self.model, field, raw, "omitting unparseable field");
    self.warnings.push(NormalizationWarning {
      model: self.model.to_string(),
      field,
      raw: raw.to_string(),
    });
  }

  fn quantity(&mut self, field: &'static str, raw: &str, suffixes: &[&str], unit: &str) -> Option<Measure> {
    match parse_quantity(raw, suffixes) {
      Some(value) => Some(Measure::new(value, unit)),
      None => {
        self.omit(field, raw);
        None
      }
    }
  }

  fn range(&mut self, field: &'static str, raw: &str, suffixes: &[&str], unit: &str) -> Option<ValueRange> {
    match parse_range(raw, suffixes).and_then(|(min, max)| ValueRange::new(min, max, unit)) {
      Some(range) => Some(range),
      None => {
        self.omit(field, raw);
        None
      }
    }
  }

  fn charge_time(&mut self, raw: &str) -> Option<ChargeTime> {
    if let Some(range) = parse_range(raw, HOUR_UNITS).and_then(|(min, max)| ValueRange::new(min, max, "hours")) {
      return Some(ChargeTime::Range(range));
    }
    self.quantity("chargeTime", raw, HOUR_UNITS, "hours").map(ChargeTime::Single)
  }
}

/// Normalize a record, discarding the list of omitted fields
pub fn normalize(record: &ProductRecord) -> ComparisonData {
  normalize_with_warnings(record).0
}

/// Normalize a record and report every field that had to be omitted
pub fn normalize_with_warnings(record: &ProductRecord) -> (ComparisonData, Vec<NormalizationWarning>) {
  let mut parser = FieldParser::new(&record.key);

  let system_specs = SystemSpecs {
    application_type: Some(record.application_type.clone()),
    dimensions: Some(record.dimensions.clone()),
    weight: Some(record.weight.clone()),
    construction: record.construction.clone(),
  };

  let flexibility = Flexibility {
    pallet_width: copy_range(&record.pallet_width),
    pallet_height: copy_range(&record.pallet_height),
  };

  let performance = Performance {
    chain_speed: parser.quantity("chainSpeed", &record.chain_speed, SPEED_UNITS, "m/min"),
    chain_length: parser.quantity("chainLength", &record.chain_length, LENGTH_UNITS, "m"),
    operation_type: Some(record.control.clone()),
  };

  let power_battery = match &record.battery {
    Some(battery) => PowerBattery {
      battery_type: Some(battery.description.clone()),
      chemistry: Some(battery.chemistry),
      weight: Some(Measure::new(battery.weight, "kg")),
      charge_time: parser.charge_time(&battery.charge_time),
      voltage: parser.quantity("voltage", &battery.voltage, VOLTAGE_UNITS, "V"),
      strapping_cycles: Some(battery.strapping_cycles),
    },
    None => PowerBattery::default(),
  };

  let sealing_head = record.sealing_head.clone().unwrap_or_default();
  let sealing_strapping = SealingStrapping {
    tension_force: sealing_head
      .tension_force
      .as_deref()
      .and_then(|raw| parser.range("tensionForce", raw, FORCE_UNITS, "daN")),
    strap_width: sealing_head
      .strap_width
      .as_deref()
      .and_then(|raw| parser.range("strapWidth", raw, WIDTH_UNITS, "mm")),
    strap_materials: record.strap_materials.clone(),
    availability: sealing_head.availability,
  };

  let control_display = ControlDisplay {
    interface_type: Some(record.control.clone()),
    touchscreen: Some(record.has_advanced_controls),
    display_type: Some(record.settings_change.clone()),
  };

  let safety_ergonomics = SafetyErgonomics {
    certifications: record.certifications.clone(),
    agr_certified: record.has_certification(AGR_CERTIFICATION),
    iso_12100: record.has_certification(ISO_12100_CERTIFICATION),
    eu_declaration: record.has_certification(EU_DECLARATION),
  };

  let (included, optional): (Vec<_>, Vec<_>) =
    record.accessories.iter().partition(|accessory| accessory.category == AccessoryCategory::Included);
  let features_accessories = FeaturesAccessories {
    included: included.into_iter().map(|accessory| accessory.name.clone()).collect(),
    optional: optional.into_iter().map(|accessory| accessory.name.clone()).collect(),
  };

  let environment = record.environment.clone().unwrap_or_default();
  let environmental = Environmental {
    operating_temperature: environment
      .operating_temperature
      .as_deref()
      .and_then(|raw| parser.range("operatingTemperature", raw, TEMPERATURE_UNITS, "°C")),
    noise_level: environment
      .noise_level
      .as_deref()
      .and_then(|raw| parser.quantity("noiseLevel", raw, NOISE_UNITS, "dB(A)")),
  };

  let maintenance_info = record.maintenance.clone().unwrap_or_default();
  let maintenance = Maintenance {
    service_interval: maintenance_info.service_interval,
    warranty: maintenance_info.warranty,
  };

  let data = ComparisonData {
    model: record.key.clone(),
    name: record.name.clone(),
    line: record.line,
    system_specs,
    flexibility,
    performance,
    power_battery,
    sealing_strapping,
    control_display,
    safety_ergonomics,
    features_accessories,
    environmental,
    maintenance,
  };

  (data, parser.warnings)
}

/// Normalize every product in catalog order
pub fn normalize_catalog(catalog: &Catalog) -> Vec<ComparisonData> {
  catalog.iter().map(normalize).collect()
}

fn copy_range(range: &ValueRange) -> Option<ValueRange> {
  ValueRange::new(range.min, range.max, range.unit.clone())
}
