//! Metabolic panel facade (glycemia and lipids).

use std::sync::OnceLock;

use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct MetabolicAnalyzer;

pub const PANEL_CODE: &str = "METABOLICO";

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "perfil metabólico",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("Glicose", "Glicose")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(70.0, 99.0).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([
                            ThresholdSpec::below(40.0, "Hipoglicemia grave"),
                            ThresholdSpec::above(500.0, "Hiperglicemia grave"),
                        ])
                        .with_significant([
                            ThresholdSpec::below(54.0, "Hipoglicemia importante"),
                            ThresholdSpec::range(250.0, 500.0, "Hiperglicemia importante"),
                        ])
                        .with_monitoring([
                            ThresholdSpec::below(70.0, "Hipoglicemia"),
                            ThresholdSpec::range(100.0, 125.0, "Glicemia de jejum alterada"),
                            ThresholdSpec::above(125.0, "Hiperglicemia"),
                        ]),
                )
                .with_critical_recommendation(
                    "Correção glicêmica imediata; investigar cetoacidose/estado hiperosmolar.",
                ),
            ParameterSpec::new("HbA1c", "HbA1c")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(4.0, 5.6).with_unit("%"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_significant([ThresholdSpec::above(6.4, "HbA1c em faixa diabética")])
                        .with_monitoring([ThresholdSpec::range(5.7, 6.4, "HbA1c em faixa de pré-diabetes")]),
                ),
            ParameterSpec::new("Triglicerídeos", "Triglicerídeos")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.0, 150.0).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::above(
                            1000.0,
                            "Hipertrigliceridemia com risco de pancreatite",
                        )])
                        .with_significant([ThresholdSpec::range(
                            500.0,
                            1000.0,
                            "Hipertrigliceridemia importante",
                        )])
                        .with_monitoring([ThresholdSpec::above(150.0, "Hipertrigliceridemia")]),
                )
                .with_critical_recommendation(
                    "Risco de pancreatite aguda; tratamento hipolipemiante urgente.",
                ),
            ParameterSpec::new("Colesterol Total", "Colesterol total")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.0, 190.0).with_unit("mg/dL"),
                ))
                .with_thresholds(ThresholdConfig::new().with_monitoring([ThresholdSpec::above(
                    190.0,
                    "Colesterol total elevado",
                )])),
            ParameterSpec::new("LDL", "LDL-colesterol")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(0.0, 130.0).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_monitoring([ThresholdSpec::above(130.0, "LDL elevado")]),
                ),
            ParameterSpec::new("HDL", "HDL-colesterol")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(40.0, 60.0).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_monitoring([ThresholdSpec::below(40.0, "HDL baixo")]),
                ),
        ],
    })
}

impl PanelAnalyzer for MetabolicAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Perfil metabólico (glicemia e lipídios)"
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
