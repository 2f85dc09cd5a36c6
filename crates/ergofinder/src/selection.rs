//! Products picked for comparison
//!
//! Every transition returns a new selection and leaves the old one untouched.

use serde::Serialize;

use crate::compare::{MAX_PRODUCTS, MIN_PRODUCTS};
use crate::{FinderError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonSelection {
  keys: Vec<String>,
}

impl ComparisonSelection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a selection from keys in order, applying the same rules as [`add`](Self::add)
  pub fn from_keys<I, S>(keys: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    keys.into_iter().try_fold(Self::new(), |selection, key| selection.add(key))
  }

  /// Append a key; duplicates and a fifth key are refused
  pub fn add(&self, key: impl Into<String>) -> Result<Self> {
    let key = key.into();
    if self.contains(&key) {
      return Err(FinderError::AlreadySelected { key });
    }
    if !self.can_add_more() {
      return Err(FinderError::InvalidSelection { count: self.keys.len() + 1 });
    }

    let mut keys = self.keys.clone();
    keys.push(key);
    Ok(Self { keys })
  }

  /// Drop a key if present
  pub fn remove(&self, key: &str) -> Self {
    Self { keys: self.keys.iter().filter(|selected| *selected != key).cloned().collect() }
  }

  pub fn clear(&self) -> Self {
    Self::new()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.keys.iter().any(|selected| selected == key)
  }

  pub fn can_add_more(&self) -> bool {
    self.keys.len() < MAX_PRODUCTS
  }

  /// Enough products to build a comparison
  pub fn is_ready(&self) -> bool {
    self.keys.len() >= MIN_PRODUCTS
  }

  pub fn keys(&self) -> &[String] {
    &self.keys
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_add_is_immutable() {
    let empty = ComparisonSelection::new();
    let one = empty.add("726E").unwrap();
    assert!(empty.is_empty());
    assert_eq!(one.keys(), ["726E"]);
    assert!(!one.is_ready());

    let two = one.add("726X").unwrap();
    assert!(two.is_ready());
    assert_eq!(one.len(), 1);
  }

  #[test]
  fn test_add_refuses_duplicates() {
    let selection = ComparisonSelection::from_keys(["726E"]).unwrap();
    let result = selection.add("726E");
    assert!(matches!(result, Err(FinderError::AlreadySelected { .. })));
  }

  #[test]
  fn test_add_refuses_fifth_key() {
    let selection = ComparisonSelection::from_keys(["713E", "726E", "745E", "GO"]).unwrap();
    assert!(!selection.can_add_more());
    let result = selection.add("RE");
    assert!(matches!(result, Err(FinderError::InvalidSelection { count: 5 })));
    assert_eq!(selection.len(), 4);
  }

  #[test]
  fn test_remove_and_clear() {
    let selection = ComparisonSelection::from_keys(["713E", "726E", "745E"]).unwrap();
    let removed = selection.remove("726E");
    assert_eq!(removed.keys(), ["713E", "745E"]);
    assert_eq!(selection.len(), 3);

    // unknown keys are a no-op
    assert_eq!(removed.remove("999"), removed);

    let cleared = removed.clear();
    assert!(cleared.is_empty());
    assert!(cleared.can_add_more());
    assert!(!cleared.contains("713E"));
  }
}
