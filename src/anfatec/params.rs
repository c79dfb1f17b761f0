//! Key/value records produced by the parameter file parser.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{PifmError, Result};

/// Raw `key : value` pairs from one scope of a parameter file.
///
/// Used both for the global scan parameters and for each channel or
/// spectrum descriptor block. Values are kept as the raw trimmed strings;
/// typed access goes through the `require_*` helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: BTreeMap<String, String>,
}

/// Global scan parameters (pixel counts, scan size, ...).
pub type ScanParameters = ParameterMap;

/// One `File...Begin`/`File...End` or spectrum descriptor block.
pub type Descriptor = ParameterMap;

impl ParameterMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw value for a key, or `MissingParameter` naming `context`.
    pub fn require(&self, key: &str, context: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| PifmError::missing(key, context))
    }

    /// Value parsed as a pixel count.
    pub fn require_usize(&self, key: &str, context: &str) -> Result<usize> {
        let raw = self.require(key, context)?;
        raw.parse::<usize>().map_err(|_| PifmError::invalid(key, raw))
    }

    /// Value parsed as a float (scale factors and the like).
    pub fn require_f64(&self, key: &str, context: &str) -> Result<f64> {
        let raw = self.require(key, context)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PifmError::invalid(key, raw)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
