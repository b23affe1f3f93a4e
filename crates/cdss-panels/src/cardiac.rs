//! Cardiac markers facade.

use std::sync::OnceLock;

use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct CardiacAnalyzer;

pub const PANEL_CODE: &str = "MARCADORES_CARDIACOS";

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "marcadores cardíacos",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("Troponina", "Troponina")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.0, 0.04).with_unit("ng/mL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(0.4, "Lesão miocárdica extensa")])
                        .with_significant([ThresholdSpec::above(0.04, "Troponina elevada")]),
                )
                .with_critical_recommendation(
                    "Protocolo de síndrome coronariana aguda; ECG seriado.",
                ),
            ParameterSpec::new("CK", "CK total")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(30.0, 200.0).with_unit("U/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(5000.0, "Rabdomiólise grave")])
                        .with_significant([ThresholdSpec::above(1000.0, "CK muito elevada")])
                        .with_monitoring([ThresholdSpec::above(200.0, "CK elevada")]),
                )
                .with_critical_recommendation(
                    "Hidratação vigorosa e monitorização da função renal.",
                ),
            // No consensus normal interval is configured for CK-MB mass
            // here; the classifier still flags elevations.
            ParameterSpec::new("CK-MB", "CK-MB").with_thresholds(
                ThresholdConfig::new()
                    .with_significant([ThresholdSpec::above(25.0, "CK-MB elevada")]),
            ),
            ParameterSpec::new("BNP", "BNP")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.0, 100.0).with_unit("pg/mL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_significant([ThresholdSpec::above(
                            400.0,
                            "BNP compatível com insuficiência cardíaca descompensada",
                        )])
                        .with_monitoring([ThresholdSpec::range(
                            100.0,
                            400.0,
                            "BNP em zona intermediária",
                        )]),
                ),
        ],
    })
}

impl PanelAnalyzer for CardiacAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Marcadores de lesão miocárdica e função cardíaca"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        if evaluate_panel(config, input, patient, &mut out).is_none() {
            return AnalysisResult::insufficient_data(config.label);
        }
        out.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::raw_input;

    #[test]
    fn high_troponin_is_critical() {
        let result =
            CardiacAnalyzer.analyze(&raw_input([("Troponina", 1.2)]), &PatientContext::new());
        assert!(result.is_critical);
        assert!(result.abnormalities.contains("Lesão miocárdica extensa"));
    }

    #[test]
    fn ckmb_reports_missing_reference_range() {
        let result =
            CardiacAnalyzer.analyze(&raw_input([("CK-MB", 40.0)]), &PatientContext::new());
        assert!(
            result
                .interpretation
                .contains("Faixa de referência não configurada")
        );
        assert!(result.abnormalities.contains("CK-MB elevada"));
        assert!(!result.is_critical);
    }

    #[test]
    fn comparison_prefixed_troponin_uses_boundary_value() {
        // "<0.01" normalizes to 0.01, in range, so nothing to report.
        let input = raw_input([("Troponina", "<0,01")]);
        let result = CardiacAnalyzer.analyze(&input, &PatientContext::new());
        assert!(!result.is_critical);
        assert_eq!(
            result.details.get("Troponina").and_then(|v| v.as_number()),
            Some(0.01)
        );
    }
}
