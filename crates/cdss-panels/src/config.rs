//! Panel configuration.
//!
//! Every panel is data: a key vocabulary, reference ranges, threshold
//! tables and labels. The generic evaluator in [`crate::evaluate`] runs
//! the same normalize → classify → assemble skeleton over any of these;
//! panel modules only add their derived-value hooks on top.

use cdss_model::{ReferenceSpec, ThresholdConfig};

/// One parameter of a panel.
pub struct ParameterSpec {
    /// Input vocabulary key, owned by this panel (e.g. "Na+", "pH").
    pub key: &'static str,
    /// Narrative label (e.g. "Sódio").
    pub label: &'static str,
    /// Reference range echoed under `<key>_ref`; `None` with non-empty
    /// thresholds triggers the explicit "reference range not configured"
    /// narrative.
    pub reference: Option<ReferenceSpec>,
    /// Classification bands; empty when another layer (e.g. the acid-base
    /// engine) owns this parameter's narrative.
    pub thresholds: ThresholdConfig,
    /// Recommendation attached when the parameter classifies critical.
    pub critical_recommendation: Option<&'static str>,
}

impl ParameterSpec {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            reference: None,
            thresholds: ThresholdConfig::new(),
            critical_recommendation: None,
        }
    }

    pub fn with_reference(mut self, reference: ReferenceSpec) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_thresholds(mut self, thresholds: ThresholdConfig) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_critical_recommendation(mut self, recommendation: &'static str) -> Self {
        self.critical_recommendation = Some(recommendation);
        self
    }
}

/// Declarative description of one lab panel.
pub struct PanelConfig {
    /// Uppercase panel code used for registry lookup and cache keys.
    pub code: &'static str,
    /// Lowercase label used in narratives ("gasometria arterial").
    pub label: &'static str,
    pub parameters: Vec<ParameterSpec>,
    /// Minimum number of successfully parsed parameters required before
    /// the panel interprets anything; below it the facade returns the
    /// canned insufficient-data result.
    pub min_parameters: usize,
}

impl PanelConfig {
    pub fn parameter(&self, key: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|spec| spec.key == key)
    }
}
