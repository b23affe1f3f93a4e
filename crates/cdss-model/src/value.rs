use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw lab value as supplied by the caller.
///
/// Callers send values in whatever shape their upstream system produced:
/// numbers, locale-formatted strings ("7,40"), comparison-prefixed strings
/// ("<5"), or nothing at all. The normalizer is the only component that
/// looks inside `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl From<f64> for LabValue {
    fn from(value: f64) -> Self {
        LabValue::Numeric(value)
    }
}

impl From<i64> for LabValue {
    fn from(value: i64) -> Self {
        LabValue::Numeric(value as f64)
    }
}

impl From<&str> for LabValue {
    fn from(value: &str) -> Self {
        LabValue::Text(value.to_string())
    }
}

impl From<String> for LabValue {
    fn from(value: String) -> Self {
        LabValue::Text(value)
    }
}

impl fmt::Display for LabValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabValue::Numeric(value) => write!(f, "{value}"),
            LabValue::Text(text) => write!(f, "{text}"),
            LabValue::Missing => Ok(()),
        }
    }
}

/// Raw request payload: parameter key to value, keyed by the panel's own
/// vocabulary (e.g. "pH", "pCO2", "Na+"). Keys are not case-normalized
/// across panels; each facade owns its vocabulary.
pub type RawLabInput = BTreeMap<String, LabValue>;

/// Canonical parameter name to parsed value. Absence means "not provided"
/// or "could not be parsed"; the two are deliberately indistinguishable
/// downstream. Every value present is a finite float.
pub type NormalizedParameters = BTreeMap<String, f64>;

/// Convenience constructor for tests and in-process callers.
pub fn raw_input<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> RawLabInput
where
    K: Into<String>,
    V: Into<LabValue>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
