//! Numbers and ranges embedded in free-text catalog fields
//!
//! Catalog authors write values like `"40m/min"`, `"~3.5 hours"` or
//! `"9-13mm"`. These helpers parse them strictly: a value either parses
//! completely or the caller gets `None` and omits the field. There is no
//! fallback to zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value with its unit attached literally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
  pub value: f64,
  pub unit: String,
}

impl Measure {
  pub fn new(value: f64, unit: impl Into<String>) -> Self {
    Self { value, unit: unit.into() }
  }
}

impl fmt::Display for Measure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.value, self.unit)
  }
}

/// An inclusive `min..=max` range; construction guarantees `min <= max`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
  pub min: f64,
  pub max: f64,
  pub unit: String,
}

impl ValueRange {
  /// Returns `None` when the bounds are inverted or not finite
  pub fn new(min: f64, max: f64, unit: impl Into<String>) -> Option<Self> {
    if !min.is_finite() || !max.is_finite() || min > max {
      return None;
    }
    Some(Self { min, max, unit: unit.into() })
  }
}

impl fmt::Display for ValueRange {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {} {}", self.min, self.max, self.unit)
  }
}

fn strip_unit<'a>(text: &'a str, suffixes: &[&str]) -> &'a str {
  let trimmed = text.trim();
  for suffix in suffixes {
    if let Some(rest) = trimmed.strip_suffix(suffix) {
      return rest.trim_end();
    }
  }
  trimmed
}

fn parse_number(text: &str) -> Option<f64> {
  text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a single number after removing one of `suffixes` and a leading `~`
///
/// `parse_quantity("40m/min", &["m/min"]) == Some(40.0)`, while
/// `parse_quantity("Hand Crank", &["m/min"]) == None`.
pub fn parse_quantity(text: &str, suffixes: &[&str]) -> Option<f64> {
  let stripped = strip_unit(text, suffixes);
  let stripped = stripped.strip_prefix('~').unwrap_or(stripped);
  parse_number(stripped)
}

/// Parse `"<min>-<max>"` (optionally followed by one of `suffixes`)
///
/// The separator is the first `-` that follows a digit, so a negative lower
/// bound such as `"-10-40°C"` parses. Both halves must parse and
/// `min <= max`, otherwise the whole range is rejected.
pub fn parse_range(text: &str, suffixes: &[&str]) -> Option<(f64, f64)> {
  let stripped = strip_unit(text, suffixes);
  let (split, _) = stripped
    .char_indices()
    .skip(1)
    .find(|&(index, c)| c == '-' && stripped[..index].trim_end().ends_with(|p: char| p.is_ascii_digit()))?;

  let min = parse_number(&stripped[..split])?;
  let max = parse_number(&stripped[split + 1..])?;
  (min <= max).then_some((min, max))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_quantity_strips_suffix() {
    assert_eq!(parse_quantity("40m/min", &["m/min"]), Some(40.0));
    assert_eq!(parse_quantity(" 66 m/min ", &["m/min"]), Some(66.0));
    assert_eq!(parse_quantity("36.3V", &["V"]), Some(36.3));
    assert_eq!(parse_quantity("6m", &["m"]), Some(6.0));
  }

  #[test]
  fn test_parse_quantity_approximation_marker() {
    assert_eq!(parse_quantity("~3.5 hours", &["hours", "h"]), Some(3.5));
  }

  #[test]
  fn test_parse_quantity_rejects_text() {
    assert_eq!(parse_quantity("Hand Crank", &["m/min"]), None);
    assert_eq!(parse_quantity("Manual", &["m/min"]), None);
    assert_eq!(parse_quantity("", &["m/min"]), None);
    assert_eq!(parse_quantity("NaN", &[]), None);
    assert_eq!(parse_quantity("inf", &[]), None);
  }

  #[test]
  fn test_parse_quantity_unknown_suffix_is_not_stripped() {
    assert_eq!(parse_quantity("40 ft/min", &["m/min"]), None);
  }

  #[test]
  fn test_parse_range() {
    assert_eq!(parse_range("9-13mm", &["mm"]), Some((9.0, 13.0)));
    assert_eq!(parse_range("10 - 230", &[]), Some((10.0, 230.0)));
    assert_eq!(parse_range("8-10 hours", &["hours"]), Some((8.0, 10.0)));
  }

  #[test]
  fn test_parse_range_rejects_partial_or_inverted() {
    assert_eq!(parse_range("9-abc", &["mm"]), None);
    assert_eq!(parse_range("13-9mm", &["mm"]), None);
    assert_eq!(parse_range("9-13-16", &[]), None);
    assert_eq!(parse_range("13mm", &["mm"]), None);
    assert_eq!(parse_range("-10", &[]), None);
  }

  #[test]
  fn test_parse_range_negative_bounds() {
    assert_eq!(parse_range("-10-40°C", &["°C"]), Some((-10.0, 40.0)));
    assert_eq!(parse_range("-20 - -5", &[]), Some((-20.0, -5.0)));
    assert_eq!(parse_range("-5--20", &[]), None);
  }

  #[test]
  fn test_value_range_invariant() {
    assert!(ValueRange::new(30.0, 255.0, "cm").is_some());
    assert!(ValueRange::new(10.0, 10.0, "cm").is_some());
    assert!(ValueRange::new(255.0, 30.0, "cm").is_none());
    assert!(ValueRange::new(f64::NAN, 30.0, "cm").is_none());
  }

  #[test]
  fn test_display() {
    assert_eq!(Measure::new(40.0, "m/min").to_string(), "40 m/min");
    assert_eq!(Measure::new(64.4, "kg").to_string(), "64.4 kg");
    let range = ValueRange::new(30.0, 255.0, "cm").unwrap();
    assert_eq!(range.to_string(), "30 - 255 cm");
  }
}
