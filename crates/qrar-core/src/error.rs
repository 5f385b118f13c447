//! Validation error collection for `qrar-core`.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Per-field validation failures, collected wholesale rather than
/// fail-fast. Keys are the JSON field names of the offending payload
/// fields (`"title"`, `"type"`, `"mediaUrl"`).
#[derive(Debug, Clone, Default, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed on fields: {}", field_names(.0))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  /// Append `message` to the error list for `field`.
  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self
      .0
      .entry(field.to_owned())
      .or_default()
      .push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }
}

fn field_names(map: &BTreeMap<String, Vec<String>>) -> String {
  map.keys().cloned().collect::<Vec<_>>().join(", ")
}
