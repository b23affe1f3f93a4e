use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A value echoed into the detail map: parsed and derived quantities are
/// numbers, reference ranges and status annotations are text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Number(f64),
    Text(String),
}

impl From<f64> for DetailValue {
    fn from(value: f64) -> Self {
        DetailValue::Number(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::Text(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::Text(value)
    }
}

impl DetailValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DetailValue::Number(value) => Some(*value),
            DetailValue::Text(_) => None,
        }
    }
}

/// The universal output shape of every analyzer.
///
/// Narrative lines are order-significant (oxygenation status, acid-base
/// status, interpretation body, compensation status); abnormality tags and
/// recommendations are sets with no meaningful order. Results are created
/// fresh per call and never mutated after return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Newline-joined narrative text.
    pub interpretation: String,
    /// Deduplicated short abnormality tags.
    pub abnormalities: BTreeSet<String>,
    /// Logical OR across every critical finding; never reset once raised.
    pub is_critical: bool,
    /// Deduplicated recommendation strings.
    pub recommendations: BTreeSet<String>,
    /// Every parsed raw value, every derived value, and the `*_ref`
    /// reference-range text used for each comparison.
    pub details: BTreeMap<String, DetailValue>,
}

impl AnalysisResult {
    /// Canned result used by facades when no panel-relevant parameter was
    /// present (or none parsed).
    pub fn insufficient_data(panel_label: &str) -> Self {
        Self {
            interpretation: format!(
                "Dados insuficientes para interpretação de {panel_label}."
            ),
            abnormalities: BTreeSet::new(),
            is_critical: false,
            recommendations: BTreeSet::from(["Repetir coleta com os parâmetros necessários."
                .to_string()]),
            details: BTreeMap::new(),
        }
    }

    /// True when the canned insufficient-data path produced this result.
    pub fn is_insufficient(&self) -> bool {
        self.details.is_empty() && self.interpretation.starts_with("Dados insuficientes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_value_serializes_untagged() {
        let json = serde_json::to_string(&DetailValue::Number(7.4)).expect("serialize");
        assert_eq!(json, "7.4");
        let json = serde_json::to_string(&DetailValue::from("7.35-7.45")).expect("serialize");
        assert_eq!(json, "\"7.35-7.45\"");
    }

    #[test]
    fn insufficient_data_is_recognizable() {
        let result = AnalysisResult::insufficient_data("gasometria arterial");
        assert!(result.is_insufficient());
        assert!(!result.is_critical);
        assert!(
            result
                .interpretation
                .contains("gasometria arterial")
        );
    }

    #[test]
    fn result_round_trips_through_json() {
        let mut result = AnalysisResult::default();
        result.interpretation = "pH normal".to_string();
        result.abnormalities.insert("Hipoxemia".to_string());
        result
            .details
            .insert("pH".to_string(), DetailValue::Number(7.4));
        result
            .details
            .insert("pH_ref".to_string(), DetailValue::from("7.35-7.45"));

        let json = serde_json::to_string(&result).expect("serialize result");
        let round: AnalysisResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
