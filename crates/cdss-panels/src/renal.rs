//! Renal function facade.

use std::sync::OnceLock;

use cdss_calc::{bun_creatinine_ratio, egfr_ckd_epi};
use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct RenalAnalyzer;

pub const PANEL_CODE: &str = "FUNCAO_RENAL";

/// Urea-to-BUN conversion factor (urea mg/dL -> BUN mg/dL).
const UREA_TO_BUN: f64 = 2.14;

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "função renal",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("Creatinina", "Creatinina")
                .with_reference(ReferenceSpec::by_sex(
                    ReferenceRange::new(0.6, 1.3).with_unit("mg/dL"),
                    ReferenceRange::new(0.7, 1.3).with_unit("mg/dL"),
                    ReferenceRange::new(0.6, 1.1).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(
                            4.0,
                            "Elevação acentuada de creatinina",
                        )])
                        .with_significant([ThresholdSpec::range(
                            2.0,
                            4.0,
                            "Elevação importante de creatinina",
                        )])
                        .with_monitoring([ThresholdSpec::above(1.3, "Creatinina elevada")]),
                )
                .with_critical_recommendation(
                    "Avaliar lesão renal aguda; considerar nefrologia.",
                ),
            ParameterSpec::new("Ureia", "Ureia")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(15.0, 45.0).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(200.0, "Uremia grave")])
                        .with_significant([ThresholdSpec::range(100.0, 200.0, "Uremia importante")])
                        .with_monitoring([ThresholdSpec::above(45.0, "Ureia elevada")]),
                )
                .with_critical_recommendation("Avaliar indicação de terapia dialítica."),
        ],
    })
}

/// KDIGO-style eGFR staging; G4/G5 escalate criticality.
fn stage_egfr(egfr: f64, out: &mut ResultAssembler) {
    out.detail("TFG estimada", egfr);
    out.detail_reference_text("TFG estimada", "≥ 90 mL/min/1.73m²");
    if egfr >= 90.0 {
        out.push_line(format!("TFG estimada {egfr:.0} mL/min/1.73m² (G1)."));
    } else if egfr >= 60.0 {
        out.push_line(format!(
            "TFG estimada {egfr:.0} mL/min/1.73m²: redução discreta (G2)."
        ));
    } else if egfr >= 45.0 {
        out.push_line(format!(
            "TFG estimada {egfr:.0} mL/min/1.73m²: DRC estágio G3a."
        ));
        out.add_abnormality("DRC G3a");
    } else if egfr >= 30.0 {
        out.push_line(format!(
            "TFG estimada {egfr:.0} mL/min/1.73m²: DRC estágio G3b."
        ));
        out.add_abnormality("DRC G3b");
    } else if egfr >= 15.0 {
        out.push_line(format!(
            "TFG estimada {egfr:.0} mL/min/1.73m²: DRC estágio G4."
        ));
        out.add_abnormality("DRC G4");
        out.add_recommendation("Encaminhar à nefrologia.");
    } else {
        out.flag_critical(true);
        out.push_line(format!(
            "TFG estimada {egfr:.0} mL/min/1.73m²: falência renal (G5)."
        ));
        out.add_abnormality("Falência renal");
        out.add_recommendation("Encaminhar à nefrologia.");
        out.add_recommendation("Avaliar indicação de terapia dialítica.");
    }
}

impl PanelAnalyzer for RenalAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Função renal (creatinina, ureia, TFG)"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        let Some(values) = evaluate_panel(config, input, patient, &mut out) else {
            return AnalysisResult::insufficient_data(config.label);
        };

        let creatinine = values.get("Creatinina").copied();
        if let (Some(&urea), Some(creatinine)) = (values.get("Ureia"), creatinine) {
            let bun = urea / UREA_TO_BUN;
            if let Some(ratio) = bun_creatinine_ratio(bun, creatinine) {
                out.detail("BUN/Creatinina", ratio);
                out.detail_reference_text("BUN/Creatinina", "10-20");
                if ratio > 20.0 {
                    out.push_line(format!(
                        "Relação BUN/creatinina {ratio:.0}: padrão pré-renal."
                    ));
                } else if ratio < 10.0 {
                    out.push_line(format!(
                        "Relação BUN/creatinina {ratio:.0}: padrão renal intrínseco."
                    ));
                }
            }
        }

        if let (Some(creatinine), Some(age), Some(sex)) = (creatinine, patient.age, patient.sex) {
            if let Some(egfr) = egfr_ckd_epi(creatinine, age, sex) {
                stage_egfr(egfr, &mut out);
            }
        }

        out.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::{Sex, raw_input};

    #[test]
    fn egfr_requires_age_and_sex() {
        let input = raw_input([("Creatinina", 2.5)]);
        let without = RenalAnalyzer.analyze(&input, &PatientContext::new());
        assert!(!without.details.contains_key("TFG estimada"));

        let patient = PatientContext::new().with_age(60).with_sex(Sex::Female);
        let with = RenalAnalyzer.analyze(&input, &patient);
        assert!(with.details.contains_key("TFG estimada"));
        // Creatinine 2.5 at 60y female lands in stage G4.
        assert!(with.abnormalities.contains("DRC G4"));
        assert!(with.recommendations.contains("Encaminhar à nefrologia."));
    }

    #[test]
    fn prerenal_pattern_from_bun_creatinine_ratio() {
        // Urea 120 -> BUN ~56; creatinine 1.2 -> ratio ~47.
        let input = raw_input([("Ureia", 120.0), ("Creatinina", 1.2)]);
        let result = RenalAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.interpretation.contains("padrão pré-renal"));
    }

    #[test]
    fn creatinine_uses_sex_specific_reference() {
        let input = raw_input([("Creatinina", 1.2)]);
        let female = PatientContext::new().with_sex(Sex::Female);
        let result = RenalAnalyzer.analyze(&input, &female);
        assert_eq!(
            result.details.get("Creatinina_ref"),
            Some(&cdss_model::DetailValue::Text("0.6-1.1 mg/dL".to_string()))
        );
    }
}
