//! Stratified threshold classification.
//!
//! Every analyzer flags single parameters the same way: ordered bands per
//! criticality level, evaluated critical first, significant second,
//! monitoring last, first match wins. Values inside all bands still get a
//! monitoring-level status so callers always receive a classification.

use cdss_model::{CriticalityLevel, ThresholdConfig, ThresholdSpec};

/// Outcome of classifying one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub level: CriticalityLevel,
    pub description: String,
}

impl Classification {
    fn new(level: CriticalityLevel, description: impl Into<String>) -> Self {
        Self {
            level,
            description: description.into(),
        }
    }
}

/// Classify `value` against the ordered bands in `thresholds`.
///
/// An absent value classifies as `Unknown`. When no band matches, the
/// parameter is in range and the fallback is a monitoring-level status
/// with a generic description.
pub fn classify(
    parameter: &str,
    value: Option<f64>,
    thresholds: &ThresholdConfig,
) -> Classification {
    let Some(value) = value else {
        return Classification::new(
            CriticalityLevel::Unknown,
            format!("{parameter}: valor não disponível"),
        );
    };

    if let Some(spec) = first_match(&thresholds.critical, value) {
        return Classification::new(CriticalityLevel::Critical, spec.description.clone());
    }
    if let Some(spec) = first_match(&thresholds.significant, value) {
        return Classification::new(CriticalityLevel::Significant, spec.description.clone());
    }
    if let Some(spec) = first_match(&thresholds.monitoring, value) {
        return Classification::new(CriticalityLevel::Monitoring, spec.description.clone());
    }

    Classification::new(
        CriticalityLevel::Monitoring,
        format!("{parameter} dentro da faixa esperada"),
    )
}

fn first_match(specs: &[ThresholdSpec], value: f64) -> Option<&ThresholdSpec> {
    specs.iter().find(|spec| spec.band.matches(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::ThresholdSpec;

    fn potassium_thresholds() -> ThresholdConfig {
        ThresholdConfig::new()
            .with_critical([
                ThresholdSpec::above(6.5, "Hipercalemia grave"),
                ThresholdSpec::below(2.5, "Hipocalemia grave"),
            ])
            .with_significant([
                ThresholdSpec::range(5.5, 6.5, "Hipercalemia moderada"),
                ThresholdSpec::range(2.5, 3.0, "Hipocalemia moderada"),
            ])
            .with_monitoring([
                ThresholdSpec::range(5.0, 5.5, "Hipercalemia leve"),
                ThresholdSpec::range(3.0, 3.5, "Hipocalemia leve"),
            ])
    }

    #[test]
    fn absent_value_is_unknown() {
        let result = classify("K+", None, &potassium_thresholds());
        assert_eq!(result.level, CriticalityLevel::Unknown);
    }

    #[test]
    fn critical_band_wins_over_overlapping_lower_bands() {
        // 7.0 matches both the critical magnitude (>6.5) and nothing else;
        // craft an overlapping config to prove priority.
        let overlapping = ThresholdConfig::new()
            .with_critical([ThresholdSpec::above(6.5, "crítico")])
            .with_monitoring([ThresholdSpec::above(5.0, "monitorar")]);
        let result = classify("K+", Some(7.0), &overlapping);
        assert_eq!(result.level, CriticalityLevel::Critical);
        assert_eq!(result.description, "crítico");
    }

    #[test]
    fn bands_fall_through_in_order() {
        let thresholds = potassium_thresholds();
        assert_eq!(
            classify("K+", Some(6.0), &thresholds).level,
            CriticalityLevel::Significant
        );
        assert_eq!(
            classify("K+", Some(5.2), &thresholds).level,
            CriticalityLevel::Monitoring
        );
    }

    #[test]
    fn in_range_value_defaults_to_monitoring() {
        let result = classify("K+", Some(4.2), &potassium_thresholds());
        assert_eq!(result.level, CriticalityLevel::Monitoring);
        assert!(result.description.contains("dentro da faixa"));
    }
}
