//! Hematology facade.

use std::sync::OnceLock;

use cdss_calc::reticulocyte_production_index;
use cdss_engine::{PanelAnalyzer, ResultAssembler};
use cdss_model::{
    AnalysisResult, PatientContext, RawLabInput, ReferenceRange, ReferenceSpec, ThresholdConfig,
    ThresholdSpec,
};

use crate::config::{PanelConfig, ParameterSpec};
use crate::evaluate::evaluate_panel;

pub struct HematologyAnalyzer;

pub const PANEL_CODE: &str = "HEMOGRAMA";

fn hemoglobin_reference() -> ReferenceSpec {
    ReferenceSpec::by_sex(
        ReferenceRange::new(12.0, 17.5).with_unit("g/dL"),
        ReferenceRange::new(13.5, 17.5).with_unit("g/dL"),
        ReferenceRange::new(12.0, 15.5).with_unit("g/dL"),
    )
}

fn config() -> &'static PanelConfig {
    static CONFIG: OnceLock<PanelConfig> = OnceLock::new();
    CONFIG.get_or_init(|| PanelConfig {
        code: PANEL_CODE,
        label: "hemograma",
        min_parameters: 1,
        parameters: vec![
            ParameterSpec::new("Hb", "Hemoglobina")
                .with_reference(hemoglobin_reference())
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::below(7.0, "Anemia grave")])
                        .with_significant([ThresholdSpec::range(7.0, 10.0, "Anemia moderada")])
                        .with_monitoring([
                            ThresholdSpec::range(10.0, 12.0, "Anemia leve"),
                            ThresholdSpec::above(17.5, "Poliglobulia"),
                        ]),
                )
                .with_critical_recommendation("Avaliar necessidade de transfusão."),
            ParameterSpec::new("Ht", "Hematócrito").with_reference(ReferenceSpec::by_sex(
                ReferenceRange::new(36.0, 53.0).with_unit("%"),
                ReferenceRange::new(41.0, 53.0).with_unit("%"),
                ReferenceRange::new(36.0, 46.0).with_unit("%"),
            )),
            ParameterSpec::new("Leucócitos", "Leucócitos")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(4000.0, 11000.0).with_unit("/mm³"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([
                            ThresholdSpec::below(1000.0, "Leucopenia grave"),
                            ThresholdSpec::above(50000.0, "Leucocitose extrema"),
                        ])
                        .with_significant([
                            ThresholdSpec::range(1000.0, 2000.0, "Leucopenia importante"),
                            ThresholdSpec::range(20000.0, 50000.0, "Leucocitose acentuada"),
                        ])
                        .with_monitoring([
                            ThresholdSpec::below(4000.0, "Leucopenia"),
                            ThresholdSpec::above(11000.0, "Leucocitose"),
                        ]),
                )
                .with_critical_recommendation(
                    "Isolamento protetor e investigação hematológica urgente.",
                ),
            ParameterSpec::new("Plaquetas", "Plaquetas")
                .with_reference(ReferenceSpec::uniform(
                    ReferenceRange::new(150000.0, 450000.0).with_unit("/mm³"),
                ))
                .with_thresholds(
                    ThresholdConfig::new()
                        .with_critical([ThresholdSpec::below(20000.0, "Plaquetopenia grave")])
                        .with_significant([ThresholdSpec::range(
                            20000.0,
                            50000.0,
                            "Plaquetopenia importante",
                        )])
                        .with_monitoring([
                            ThresholdSpec::below(150000.0, "Plaquetopenia"),
                            ThresholdSpec::above(450000.0, "Trombocitose"),
                        ]),
                )
                .with_critical_recommendation(
                    "Risco de sangramento espontâneo; avaliar transfusão de plaquetas.",
                ),
            ParameterSpec::new("Reticulócitos", "Reticulócitos").with_reference(
                ReferenceSpec::uniform(ReferenceRange::new(0.5, 2.5).with_unit("%")),
            ),
        ],
    })
}

impl PanelAnalyzer for HematologyAnalyzer {
    fn panel_code(&self) -> &'static str {
        PANEL_CODE
    }

    fn description(&self) -> &'static str {
        "Hemograma (série vermelha, branca e plaquetas)"
    }

    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult {
        let config = config();
        let mut out = ResultAssembler::new();
        let Some(values) = evaluate_panel(config, input, patient, &mut out) else {
            return AnalysisResult::insufficient_data(config.label);
        };

        // Reticulocyte production index qualifies the marrow response to
        // anemia; only meaningful when hemoglobin is actually low.
        if let (Some(&retic), Some(&hematocrit)) =
            (values.get("Reticulócitos"), values.get("Ht"))
        {
            if let Some(rpi) = reticulocyte_production_index(retic, hematocrit) {
                out.detail("IPR", rpi);
                out.detail_reference_text("IPR", "2-3");
                let anemic = values
                    .get("Hb")
                    .map(|&hb| hemoglobin_reference().resolve(patient).is_below(hb))
                    .unwrap_or(false);
                if anemic {
                    if rpi < 2.0 {
                        out.push_line(format!(
                            "Índice de produção reticulocitária {rpi:.1}: resposta medular \
                             hipoproliferativa."
                        ));
                    } else if rpi >= 3.0 {
                        out.push_line(format!(
                            "Índice de produção reticulocitária {rpi:.1}: resposta medular \
                             adequada, sugerindo hemólise ou sangramento."
                        ));
                    }
                }
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
    fn severe_anemia_is_critical() {
        let result =
            HematologyAnalyzer.analyze(&raw_input([("Hb", 6.2)]), &PatientContext::new());
        assert!(result.is_critical);
        assert!(result.abnormalities.contains("Anemia grave"));
        assert!(
            result
                .recommendations
                .contains("Avaliar necessidade de transfusão.")
        );
    }

    #[test]
    fn hypoproliferative_anemia_via_rpi() {
        let input = raw_input([("Hb", 8.0), ("Ht", 24.0), ("Reticulócitos", 1.0)]);
        let result = HematologyAnalyzer.analyze(&input, &PatientContext::new());
        // Corrected retic = 1.0 * 24/45 = 0.53; factor 2.5 -> RPI ~0.2.
        assert!(result.interpretation.contains("hipoproliferativa"));
    }

    #[test]
    fn rpi_is_silent_without_anemia() {
        let input = raw_input([("Hb", 14.0), ("Ht", 45.0), ("Reticulócitos", 1.0)]);
        let patient = PatientContext::new().with_sex(Sex::Male);
        let result = HematologyAnalyzer.analyze(&input, &patient);
        assert!(result.details.contains_key("IPR"));
        assert!(!result.interpretation.contains("resposta medular"));
    }
}
