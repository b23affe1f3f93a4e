//! Result assembly.
//!
//! Findings accumulate here in whatever order the engine produces them;
//! the final narrative order is fixed regardless: oxygenation status,
//! acid-base status, interpretation body, trailing compensation status.
//! Abnormalities and recommendations are sets; order is irrelevant at
//! the boundary even though accumulation is list-ordered.

use std::collections::{BTreeMap, BTreeSet};

use cdss_model::{AnalysisResult, DetailValue, ReferenceRange};

#[derive(Debug, Default)]
pub struct ResultAssembler {
    oxygenation_status: Option<String>,
    acid_base_status: Option<String>,
    body: Vec<String>,
    compensation_status: Option<String>,
    abnormalities: BTreeSet<String>,
    recommendations: BTreeSet<String>,
    critical: bool,
    details: BTreeMap<String, DetailValue>,
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// First narrative line when present.
    pub fn set_oxygenation_status(&mut self, status: impl Into<String>) {
        self.oxygenation_status = Some(status.into());
    }

    /// Second narrative line when present.
    pub fn set_acid_base_status(&mut self, status: impl Into<String>) {
        self.acid_base_status = Some(status.into());
    }

    /// Append an interpretation line; body order is production order.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    /// Trailing narrative line when present.
    pub fn set_compensation_status(&mut self, status: impl Into<String>) {
        self.compensation_status = Some(status.into());
    }

    pub fn add_abnormality(&mut self, tag: impl Into<String>) {
        self.abnormalities.insert(tag.into());
    }

    pub fn add_recommendation(&mut self, recommendation: impl Into<String>) {
        self.recommendations.insert(recommendation.into());
    }

    /// Criticality is a monotone OR: once raised it is never reset.
    pub fn flag_critical(&mut self, critical: bool) {
        self.critical |= critical;
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn detail(&mut self, key: impl Into<String>, value: impl Into<DetailValue>) {
        self.details.insert(key.into(), value.into());
    }

    /// Record the reference range used for a comparison under `<key>_ref`.
    pub fn detail_reference(&mut self, key: &str, range: &ReferenceRange) {
        self.details
            .insert(format!("{key}_ref"), DetailValue::Text(range.display()));
    }

    /// Same as [`detail_reference`] for ranges that are not a closed
    /// interval (e.g. "≥ 300" for the P/F ratio).
    pub fn detail_reference_text(&mut self, key: &str, text: impl Into<String>) {
        self.details
            .insert(format!("{key}_ref"), DetailValue::Text(text.into()));
    }

    pub fn build(self) -> AnalysisResult {
        let mut lines = Vec::new();
        if let Some(status) = self.oxygenation_status {
            lines.push(status);
        }
        if let Some(status) = self.acid_base_status {
            lines.push(status);
        }
        lines.extend(self.body);
        if let Some(status) = self.compensation_status {
            lines.push(status);
        }
        AnalysisResult {
            interpretation: lines.join("\n"),
            abnormalities: self.abnormalities,
            is_critical: self.critical,
            recommendations: self.recommendations,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrative_order_is_fixed() {
        let mut assembler = ResultAssembler::new();
        assembler.push_line("corpo 1");
        assembler.set_compensation_status("compensação");
        assembler.set_acid_base_status("acidobásico");
        assembler.push_line("corpo 2");
        assembler.set_oxygenation_status("oxigenação");

        let result = assembler.build();
        let lines: Vec<&str> = result.interpretation.lines().collect();
        assert_eq!(
            lines,
            ["oxigenação", "acidobásico", "corpo 1", "corpo 2", "compensação"]
        );
    }

    #[test]
    fn critical_flag_is_monotone() {
        let mut assembler = ResultAssembler::new();
        assembler.flag_critical(true);
        assembler.flag_critical(false);
        assert!(assembler.is_critical());
        assert!(assembler.build().is_critical);
    }

    #[test]
    fn duplicate_tags_collapse() {
        let mut assembler = ResultAssembler::new();
        assembler.add_abnormality("Hipoxemia");
        assembler.add_abnormality("Hipoxemia");
        let result = assembler.build();
        assert_eq!(result.abnormalities.len(), 1);
    }

    #[test]
    fn reference_details_use_ref_suffix() {
        let mut assembler = ResultAssembler::new();
        assembler.detail("pH", 7.4);
        assembler.detail_reference("pH", &ReferenceRange::new(7.35, 7.45));
        let result = assembler.build();
        assert_eq!(
            result.details.get("pH_ref"),
            Some(&DetailValue::Text("7.35-7.45".to_string()))
        );
    }
}
