//! Tolerant numeric normalization of raw lab values.
//!
//! Upstream systems deliver lab results as numbers, dot-decimal strings,
//! comma-decimal strings ("7,40"), and comparison-prefixed strings ("<5",
//! "> 1000"). This module collapses all of those into a plain `f64` or an
//! explicit parse error; it never panics and never lets an error escape
//! the map-level helpers.

use std::collections::BTreeMap;

use tracing::debug;

use cdss_model::{LabValue, NormalizedParameters, RawLabInput};

use crate::NormalizeError;

/// Normalize a single raw value into a finite float.
///
/// Text handling: trim; when the string contains a comma, the locale is
/// assumed to use comma as decimal separator and dot as thousands
/// separator (dots removed, comma replaced by dot); then a standard float
/// parse. If that fails and the string carries a leading `<` or `>`
/// comparison prefix, the prefix is stripped and the parse retried.
///
/// The comparison direction is discarded: "<5" normalizes to the boundary
/// value 5. This is a known approximation: downstream threshold
/// comparisons treat the result as an exact value, which can misclassify
/// borderline censored results.
pub fn normalize_value(value: &LabValue) -> Result<f64, NormalizeError> {
    match value {
        LabValue::Numeric(number) => {
            if number.is_finite() {
                Ok(*number)
            } else {
                Err(NormalizeError::NotFinite(*number))
            }
        }
        LabValue::Text(text) => normalize_text(text),
        LabValue::Missing => Err(NormalizeError::Missing),
    }
}

fn normalize_text(text: &str) -> Result<f64, NormalizeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::Missing);
    }

    let cleaned = clean_locale(trimmed);
    if let Ok(parsed) = cleaned.parse::<f64>() {
        return finite_or_err(parsed, text);
    }

    // Comparison prefix: strip one leading "<" or ">" and retry with the
    // boundary value. Direction is discarded.
    if let Some(stripped) = trimmed.strip_prefix('<').or_else(|| trimmed.strip_prefix('>')) {
        let cleaned = clean_locale(stripped.trim());
        if let Ok(parsed) = cleaned.parse::<f64>() {
            return finite_or_err(parsed, text);
        }
    }

    Err(NormalizeError::Unparseable(text.to_string()))
}

/// Comma present means comma-decimal locale: dots are thousands
/// separators. Without a comma the string is already dot-decimal.
fn clean_locale(text: &str) -> String {
    if text.contains(',') {
        text.replace('.', "").replace(',', ".")
    } else {
        text.to_string()
    }
}

fn finite_or_err(parsed: f64, raw: &str) -> Result<f64, NormalizeError> {
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(NormalizeError::Unparseable(raw.to_string()))
    }
}

/// Normalize every entry of a raw input map.
///
/// Parse failures are logged and excluded; missing values are excluded
/// silently. Both end up indistinguishable downstream: absent, never
/// zero, never an error.
pub fn normalize_values(input: &RawLabInput) -> NormalizedParameters {
    let mut normalized = BTreeMap::new();
    for (key, value) in input {
        match normalize_value(value) {
            Ok(number) => {
                normalized.insert(key.clone(), number);
            }
            Err(NormalizeError::Missing) => {}
            Err(error) => {
                debug!(parameter = %key, raw = %value, %error, "discarding unparseable lab value");
            }
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_passes_through() {
        assert_eq!(normalize_value(&LabValue::Numeric(7.4)), Ok(7.4));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert!(normalize_value(&LabValue::Numeric(f64::NAN)).is_err());
        assert!(normalize_value(&LabValue::Numeric(f64::INFINITY)).is_err());
    }

    #[test]
    fn comma_decimal_equals_dot_decimal() {
        let comma = normalize_value(&LabValue::from("7,40")).expect("comma decimal");
        let dot = normalize_value(&LabValue::from("7.40")).expect("dot decimal");
        assert_eq!(comma, dot);
    }

    #[test]
    fn dot_is_thousands_separator_when_comma_present() {
        assert_eq!(normalize_value(&LabValue::from("1.234,5")), Ok(1234.5));
    }

    #[test]
    fn comparison_prefix_keeps_boundary_value() {
        assert_eq!(normalize_value(&LabValue::from("<5")), Ok(5.0));
        assert_eq!(normalize_value(&LabValue::from("> 1000")), Ok(1000.0));
        assert_eq!(normalize_value(&LabValue::from("< 0,5")), Ok(0.5));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(normalize_value(&LabValue::from("  7.4  ")), Ok(7.4));
    }

    #[test]
    fn garbage_is_unparseable() {
        assert!(matches!(
            normalize_value(&LabValue::from("hemolisado")),
            Err(NormalizeError::Unparseable(_))
        ));
        assert!(matches!(
            normalize_value(&LabValue::from("<<5")),
            Err(NormalizeError::Unparseable(_))
        ));
    }

    #[test]
    fn empty_and_missing_are_missing() {
        assert!(matches!(
            normalize_value(&LabValue::from("   ")),
            Err(NormalizeError::Missing)
        ));
        assert!(matches!(
            normalize_value(&LabValue::Missing),
            Err(NormalizeError::Missing)
        ));
    }

    #[test]
    fn map_normalization_drops_failures() {
        let input = cdss_model::raw_input([
            ("pH", LabValue::from("7,35")),
            ("pCO2", LabValue::Numeric(40.0)),
            ("Lactato", LabValue::from("coagulado")),
            ("BE", LabValue::Missing),
        ]);
        let normalized = normalize_values(&input);
        assert_eq!(normalized.get("pH"), Some(&7.35));
        assert_eq!(normalized.get("pCO2"), Some(&40.0));
        assert!(!normalized.contains_key("Lactato"));
        assert!(!normalized.contains_key("BE"));
    }
}
