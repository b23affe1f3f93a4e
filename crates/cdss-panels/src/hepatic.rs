//! Hepatic function facade.

use std::sync::OnceLock;

use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct HepaticAnalyzer;

pub const PANEL_CODE: &str = "FUNCAO_HEPATICA";

/// Upper limits of normal used by the R factor.
const ALT_ULN: f64 = 56.0;
const ALP_ULN: f64 = 147.0;

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "função hepática",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("TGO", "TGO/AST")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(10.0, 40.0).with_unit("U/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(
                            1000.0,
                            "Elevação maciça de transaminases",
                        )])
                        .with_significant([ThresholdSpec::above(120.0, "TGO acima de 3x o limite")])
                        .with_monitoring([ThresholdSpec::above(40.0, "TGO elevada")]),
                )
                .with_critical_recommendation(
                    "Investigar hepatite aguda grave (isquêmica, viral, medicamentosa).",
                ),
            ParameterSpec::new("TGP", "TGP/ALT")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(7.0, ALT_ULN).with_unit("U/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(
                            1000.0,
                            "Elevação maciça de transaminases",
                        )])
                        .with_significant([ThresholdSpec::above(168.0, "TGP acima de 3x o limite")])
                        .with_monitoring([ThresholdSpec::above(ALT_ULN, "TGP elevada")]),
                )
                .with_critical_recommendation(
                    "Investigar hepatite aguda grave (isquêmica, viral, medicamentosa).",
                ),
            ParameterSpec::new("FA", "Fosfatase alcalina")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(44.0, ALP_ULN).with_unit("U/L"),
                ))
                .with_thresholds(ThresholdConfig::new().with_monitoring([ThresholdSpec::above(
                    ALP_ULN,
                    "Fosfatase alcalina elevada",
                )])),
            ParameterSpec::new("GGT", "Gama-GT")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(8.0, 61.0).with_unit("U/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_monitoring([ThresholdSpec::above(61.0, "Gama-GT elevada")]),
                ),
            ParameterSpec::new("BT", "Bilirrubina total")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.3, 1.2).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(12.0, "Hiperbilirrubinemia grave")])
                        .with_significant([ThresholdSpec::range(
                            3.0,
                            12.0,
                            "Hiperbilirrubinemia importante",
                        )])
                        .with_monitoring([ThresholdSpec::above(1.2, "Hiperbilirrubinemia")]),
                ),
            ParameterSpec::new("BD", "Bilirrubina direta").with_reference(ReferenceSpec::uniform(
                ReferenceRange::new(0.0, 0.3).with_unit("mg/dL"),
            )),
            ParameterSpec::new("Albumina", "Albumina")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(3.5, 5.2).with_unit("g/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_significant([ThresholdSpec::below(2.5, "Hipoalbuminemia importante")])
                        .with_monitoring([ThresholdSpec::below(3.5, "Hipoalbuminemia")]),
                ),
        ],
    })
}

impl PanelAnalyzer for HepaticAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Função hepática (transaminases, colestase, síntese)"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        let Some(values) = evaluate_panel(config, input, patient, &mut out) else {
            return AnalysisResult::insufficient_data(config.label);
        };

        // R factor separates hepatocellular from cholestatic injury when
        // both ALT and ALP are elevated.
        if let (Some(&alt), Some(&alp)) = (values.get("TGP"), values.get("FA")) {
            if alt > ALT_ULN && alp > 0.0 {
                let r = (alt / ALT_ULN) / (alp / ALP_ULN);
                out.detail("Fator R", r);
                out.detail_reference_text("Fator R", "<2 colestático, >5 hepatocelular");
                if r > 5.0 {
                    out.push_line(format!("Fator R {r:.1}: padrão hepatocelular."));
                } else if r < 2.0 {
                    out.push_line(format!("Fator R {r:.1}: padrão colestático."));
                } else {
                    out.push_line(format!("Fator R {r:.1}: padrão misto."));
                }
            }
        }

        // Direct fraction above 50% of an elevated total points to a
        // conjugated (obstructive/hepatocellular) hyperbilirubinemia.
        if let (Some(&total), Some(&direct)) = (values.get("BT"), values.get("BD")) {
            if total > 1.2 && total > 0.0 {
                let fraction = direct / total;
                if fraction > 0.5 {
                    out.push_line("Hiperbilirrubinemia de predomínio direto.");
                } else {
                    out.push_line("Hiperbilirrubinemia de predomínio indireto.");
                }
            }
        }

        out.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::raw_input;

    #[test]
    fn massive_transaminase_elevation_is_critical() {
        let input = raw_input([("TGP", 1500.0)]);
        let result = HepaticAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.is_critical);
        assert!(
            result
                .abnormalities
                .contains("Elevação maciça de transaminases")
        );
    }

    #[test]
    fn r_factor_separates_injury_patterns() {
        // ALT 560 (10x ULN) with normal-ish ALP 147 (1x ULN) -> R = 10.
        let input = raw_input([("TGP", 560.0), ("FA", 147.0)]);
        let result = HepaticAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.interpretation.contains("padrão hepatocelular"));

        // ALT 112 (2x) with ALP 882 (6x) -> R = 0.33.
        let input = raw_input([("TGP", 112.0), ("FA", 882.0)]);
        let result = HepaticAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.interpretation.contains("padrão colestático"));
    }

    #[test]
    fn bilirubin_predominance_is_reported() {
        let input = raw_input([("BT", 6.0), ("BD", 4.5)]);
        let result = HepaticAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.interpretation.contains("predomínio direto"));
    }
}
