//! Serum electrolytes facade.

use std::sync::OnceLock;

use cdss_calc::corrected_calcium;
use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct ElectrolytesAnalyzer;

pub const PANEL_CODE: &str = "ELETROLITOS";

fn calcium_range() -> ReferenceRange {
    ReferenceRange::new(8.5, 10.5).with_unit("mg/dL")
}

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "eletrólitos séricos",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("Na+", "Sódio")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(135.0, 145.0).with_unit("mEq/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([
                            ThresholdSpec::below(120.0, "Hiponatremia grave"),
                            ThresholdSpec::above(160.0, "Hipernatremia grave"),
                        ])
                        .with_significant([
                            ThresholdSpec::range(120.0, 130.0, "Hiponatremia moderada"),
                            ThresholdSpec::range(150.0, 160.0, "Hipernatremia moderada"),
                        ])
                        .with_monitoring([
                            ThresholdSpec::range(130.0, 135.0, "Hiponatremia leve"),
                            ThresholdSpec::range(145.0, 150.0, "Hipernatremia leve"),
                        ]),
                )
                .with_critical_recommendation(
                    "Corrigir natremia lentamente; risco de desmielinização osmótica.",
                ),
            ParameterSpec::new("K+", "Potássio")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(3.5, 5.0).with_unit("mEq/L"),
                ))
                .with_thresholds(
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
                        ]),
                )
                .with_critical_recommendation("ECG e correção imediata do potássio."),
            ParameterSpec::new("Cl-", "Cloro")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(98.0, 107.0).with_unit("mEq/L"),
                ))
                .with_thresholds(
                    ThresholdConfig::new().with_monitoring([
                        ThresholdSpec::below(98.0, "Hipocloremia"),
                        ThresholdSpec::above(107.0, "Hipercloremia"),
                    ]),
                ),
            ParameterSpec::new("Ca", "Cálcio")
                .with_reference(ReferenceSpec::uniform(calcium_range()))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([
                            ThresholdSpec::below(6.5, "Hipocalcemia grave"),
                            ThresholdSpec::above(13.0, "Hipercalcemia grave"),
                        ])
                        .with_significant([
                            ThresholdSpec::range(6.5, 7.5, "Hipocalcemia moderada"),
                            ThresholdSpec::range(11.5, 13.0, "Hipercalcemia moderada"),
                        ])
                        .with_monitoring([
                            ThresholdSpec::range(7.5, 8.5, "Hipocalcemia leve"),
                            ThresholdSpec::range(10.5, 11.5, "Hipercalcemia leve"),
                        ]),
                )
                .with_critical_recommendation(
                    "Monitorização cardíaca e correção do cálcio iônico.",
                ),
            ParameterSpec::new("Mg", "Magnésio")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(1.6, 2.6).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new().with_monitoring([
                        ThresholdSpec::below(1.6, "Hipomagnesemia"),
                        ThresholdSpec::above(2.6, "Hipermagnesemia"),
                    ]),
                ),
            ParameterSpec::new("P", "Fósforo")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(2.5, 4.5).with_unit("mg/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::below(1.0, "Hipofosfatemia grave")])
                        .with_monitoring([
                            ThresholdSpec::below(2.5, "Hipofosfatemia"),
                            ThresholdSpec::above(4.5, "Hiperfosfatemia"),
                        ]),
                ),
            ParameterSpec::new("Albumina", "Albumina").with_reference(ReferenceSpec::uniform(
                ReferenceRange::new(3.5, 5.2).with_unit("g/dL"),
            )),
        ],
    })
}

impl PanelAnalyzer for ElectrolytesAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Eletrólitos séricos"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        let Some(values) = evaluate_panel(config, input, patient, &mut out) else {
            return AnalysisResult::insufficient_data(config.label);
        };

        // Albumin-corrected calcium: hypoalbuminemia depresses total
        // calcium without changing the ionized fraction.
        if let (Some(&calcium), Some(&albumin)) = (values.get("Ca"), values.get("Albumina")) {
            if let Some(corrected) = corrected_calcium(calcium, albumin) {
                out.detail("Ca corrigido", corrected);
                out.detail_reference("Ca corrigido", &calcium_range());
                out.push_line(format!(
                    "Cálcio corrigido pela albumina: {corrected:.1} mg/dL."
                ));
                let range = calcium_range();
                if range.contains(calcium) && !range.contains(corrected) {
                    out.push_line(
                        "Alteração do cálcio evidente apenas após correção pela albumina.",
                    );
                    out.add_abnormality("Cálcio corrigido alterado");
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
    fn severe_hyperkalemia_is_critical() {
        let result =
            ElectrolytesAnalyzer.analyze(&raw_input([("K+", 7.2)]), &PatientContext::new());
        assert!(result.is_critical);
        assert!(result.abnormalities.contains("Hipercalemia grave"));
        assert!(
            result
                .recommendations
                .contains("ECG e correção imediata do potássio.")
        );
    }

    #[test]
    fn corrected_calcium_is_derived_when_albumin_present() {
        let input = raw_input([("Ca", 8.6), ("Albumina", 2.0)]);
        let result = ElectrolytesAnalyzer.analyze(&input, &PatientContext::new());
        // 8.6 + 0.8 * (4.0 - 2.0) = 10.2, still in range.
        let corrected = result
            .details
            .get("Ca corrigido")
            .and_then(|v| v.as_number())
            .expect("derived value present");
        assert!((corrected - 10.2).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_insufficient() {
        let result =
            ElectrolytesAnalyzer.analyze(&RawLabInput::new(), &PatientContext::new());
        assert!(result.is_insufficient());
    }
}
