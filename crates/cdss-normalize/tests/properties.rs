//! Property tests for normalization and classification.

use proptest::prelude::*;

use cdss_model::{CriticalityLevel, LabValue, ThresholdConfig, ThresholdSpec};
use cdss_normalize::{classify, normalize_value};

proptest! {
    /// Normalizing an already-numeric value returns the same float.
    #[test]
    fn numeric_normalization_is_identity(value in -1.0e9f64..1.0e9f64) {
        prop_assert_eq!(normalize_value(&LabValue::Numeric(value)), Ok(value));
    }

    /// A dot-decimal rendering and its comma-decimal twin normalize to the
    /// same value.
    #[test]
    fn comma_and_dot_locales_agree(integral in 0u32..100_000u32, frac in 0u32..1000u32) {
        let dot = format!("{integral}.{frac:03}");
        let comma = format!("{integral},{frac:03}");
        let parsed_dot = normalize_value(&LabValue::from(dot.as_str())).unwrap();
        let parsed_comma = normalize_value(&LabValue::from(comma.as_str())).unwrap();
        prop_assert_eq!(parsed_dot, parsed_comma);
    }

    /// Normalization parses what it already produced (idempotence through
    /// the display round trip).
    #[test]
    fn normalization_is_idempotent(value in -1.0e6f64..1.0e6f64) {
        let once = normalize_value(&LabValue::from(value.to_string().as_str())).unwrap();
        let twice = normalize_value(&LabValue::from(once.to_string().as_str())).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// No input string makes the normalizer panic; every outcome is an
    /// explicit Ok or Err.
    #[test]
    fn normalizer_is_total(text in "\\PC*") {
        let _ = normalize_value(&LabValue::from(text.as_str()));
    }

    /// A value matching both a critical and a monitoring band always
    /// classifies as critical.
    #[test]
    fn critical_band_has_priority(value in 0.0f64..1000.0f64) {
        let thresholds = ThresholdConfig::new()
            .with_critical([ThresholdSpec::range(0.0, 1000.0, "crítico")])
            .with_monitoring([ThresholdSpec::range(0.0, 1000.0, "monitorar")]);
        let result = classify("X", Some(value), &thresholds);
        prop_assert_eq!(result.level, CriticalityLevel::Critical);
    }
}
