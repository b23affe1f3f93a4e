//! Arterial blood gas facade.
//!
//! The generic skeleton handles the single-parameter flags (K+, Hb,
//! SpO2) and the detail map; the acid-base/oxygenation engine produces
//! the multi-variable findings on top. The engine owns the narrative for
//! pH, pCO2, pO2, HCO3-, BE and lactate, so those carry no threshold
//! bands here, only reference ranges for the detail map.

use std::sync::OnceLock;

use cdss_engine::acid_base::{BloodGasValues, ranges};
use cdss_engine::{PanelAnalyzer, ResultAssembler, evaluate};
use cdss_model::{
    AnalysisResult, NormalizedParameters, PatientContext, RawLabInput, ReferenceRange,
    ReferenceSpec, ThresholdConfig, ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct BloodGasAnalyzer;

pub const PANEL_CODE: &str = "GASOMETRIA";

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "gasometria arterial",
        min_parameters: 2,
        parameters: vec![
            ParameterSpec::new("pH", "pH")
                .with_reference(ReferenceSpec::uniform(ranges::ph())),
            ParameterSpec::new("pCO2", "pCO2")
                .with_reference(ReferenceSpec::uniform(ranges::pco2())),
            ParameterSpec::new("pO2", "pO2")
                .with_reference(ReferenceSpec::uniform(ranges::po2())),
            ParameterSpec::new("HCO3-", "HCO3-")
                .with_reference(ReferenceSpec::uniform(ranges::hco3())),
            ParameterSpec::new("BE", "Base excess")
                .with_reference(ReferenceSpec::uniform(ranges::base_excess())),
            ParameterSpec::new("SpO2", "SpO2")
                .with_reference(ReferenceSpec::uniform(ranges::spo2()))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::below(85.0, "Dessaturação grave")])
                        .with_significant([ThresholdSpec::range(85.0, 90.0, "Dessaturação")])
                        .with_monitoring([ThresholdSpec::range(90.0, 95.0, "SpO2 limítrofe")]),
                )
                .with_critical_recommendation("Oxigenoterapia imediata e monitorização contínua."),
            ParameterSpec::new("FiO2", "FiO2"),
            ParameterSpec::new("Lactato", "Lactato")
                .with_reference(ReferenceSpec::uniform(ranges::lactate())),
            ParameterSpec::new("Na+", "Sódio").with_reference(ReferenceSpec::uniform(
                ReferenceRange::new(135.0, 145.0).with_unit("mEq/L"),
            )),
            ParameterSpec::new("Cl-", "Cloro").with_reference(ReferenceSpec::uniform(
                ReferenceRange::new(98.0, 107.0).with_unit("mEq/L"),
            )),
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
                .with_critical_recommendation(
                    "ECG e correção imediata do potássio.",
                ),
            ParameterSpec::new("Hb", "Hemoglobina")
                .with_reference(ReferenceSpec::by_sex(
                    ReferenceRange::new(12.0, 17.5).with_unit("g/dL"),
                    ReferenceRange::new(13.5, 17.5).with_unit("g/dL"),
                    ReferenceRange::new(12.0, 15.5).with_unit("g/dL"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::below(7.0, "Anemia grave")])
                        .with_significant([ThresholdSpec::range(7.0, 10.0, "Anemia moderada")]),
                )
                .with_critical_recommendation("Avaliar necessidade de transfusão."),
        ],
    })
}

/// The blood gas panel needs pH plus at least one of pCO2/HCO3- before
/// the diagnostic tree can say anything; anything less is insufficient.
fn has_minimum_data(values: &NormalizedParameters) -> bool {
    values.contains_key("pH")
        && (values.contains_key("pCO2") || values.contains_key("HCO3-"))
}

fn blood_gas_values(values: &NormalizedParameters) -> BloodGasValues {
    BloodGasValues {
        ph: values.get("pH").copied(),
        pco2: values.get("pCO2").copied(),
        po2: values.get("pO2").copied(),
        hco3: values.get("HCO3-").copied(),
        base_excess: values.get("BE").copied(),
        fio2: values.get("FiO2").copied(),
        lactate: values.get("Lactato").copied(),
        sodium: values.get("Na+").copied(),
        chloride: values.get("Cl-").copied(),
    }
}

impl PanelAnalyzer for BloodGasAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Gasometria arterial e equilíbrio ácido-básico"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        let Some(values) = evaluate_panel(config, input, patient, &mut out) else {
            return AnalysisResult::insufficient_data(config.label);
        };
        if !has_minimum_data(&values) {
            return AnalysisResult::insufficient_data(config.label);
        }

        evaluate(&blood_gas_values(&values), &mut out);
        out.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::raw_input;

    #[test]
    fn ph_alone_is_insufficient() {
        let result =
            BloodGasAnalyzer.analyze(&raw_input([("pH", 7.4)]), &PatientContext::new());
        assert!(result.is_insufficient());
        assert!(!result.is_critical);
    }

    #[test]
    fn lactate_does_not_satisfy_minimum_data() {
        let input = raw_input([("pH", 7.4), ("Lactato", 1.0)]);
        let result = BloodGasAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.is_insufficient());
    }

    #[test]
    fn locale_formatted_strings_flow_through() {
        let input = raw_input([
            ("pH", cdss_model::LabValue::from("7,25")),
            ("pCO2", cdss_model::LabValue::from("60")),
            ("HCO3-", cdss_model::LabValue::from("24,0")),
        ]);
        let result = BloodGasAnalyzer.analyze(&input, &PatientContext::new());
        assert!(result.interpretation.contains("Acidose Respiratória"));
        assert_eq!(
            result.details.get("pH").and_then(|v| v.as_number()),
            Some(7.25)
        );
    }
}
