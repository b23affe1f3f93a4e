//! The shared panel skeleton: select keys, normalize, classify, feed the
//! assembler. Implemented once; every facade calls through here before
//! layering its own derived-value logic.

use cdss_engine::ResultAssembler;
use cdss_model::{CriticalityLevel, NormalizedParameters, PatientContext, RawLabInput};
use cdss_normalize::{classify, normalize_values};
use tracing::debug;

use crate::config::PanelConfig;

/// Run the generic skeleton for one panel.
///
/// Returns the normalized subset of panel-relevant values, or `None`
/// when fewer than `min_parameters` parsed; the caller then returns the
/// canned insufficient-data result instead of building the assembler.
pub fn evaluate_panel(
    config: &PanelConfig,
    input: &RawLabInput,
    patient: &PatientContext,
    out: &mut ResultAssembler,
) -> Option<NormalizedParameters> {
    let normalized = normalize_values(input);
    let mut selected = NormalizedParameters::new();
    for spec in &config.parameters {
        if let Some(value) = normalized.get(spec.key) {
            selected.insert(spec.key.to_string(), *value);
        }
    }

    if selected.len() < config.min_parameters {
        debug!(
            panel = config.code,
            parsed = selected.len(),
            required = config.min_parameters,
            "insufficient data for panel"
        );
        return None;
    }

    for spec in &config.parameters {
        let Some(&value) = selected.get(spec.key) else {
            continue;
        };
        out.detail(spec.key, value);

        match &spec.reference {
            Some(reference) => {
                out.detail_reference(spec.key, reference.resolve(patient));
            }
            None if !spec.thresholds.is_empty() => {
                // The panel classifies this parameter but carries no
                // configured normal interval to echo.
                out.push_line(format!(
                    "Faixa de referência não configurada para {}.",
                    spec.label
                ));
            }
            None => {}
        }

        if spec.thresholds.is_empty() {
            continue;
        }
        let classification = classify(spec.label, Some(value), &spec.thresholds);
        match classification.level {
            CriticalityLevel::Critical => {
                out.flag_critical(true);
                out.push_line(format!(
                    "{} ({}: {value}).",
                    classification.description, spec.label
                ));
                out.add_abnormality(classification.description);
                if let Some(recommendation) = spec.critical_recommendation {
                    out.add_recommendation(recommendation);
                }
            }
            CriticalityLevel::Significant => {
                out.push_line(format!(
                    "{} ({}: {value}).",
                    classification.description, spec.label
                ));
                out.add_abnormality(classification.description);
            }
            CriticalityLevel::Monitoring => {
                // The in-range fallback description stays out of the
                // narrative; configured monitoring bands are reported.
                if !classification.description.contains("dentro da faixa") {
                    out.push_line(format!(
                        "{} ({}: {value}).",
                        classification.description, spec.label
                    ));
                }
            }
            CriticalityLevel::Unknown => {}
        }
    }

    Some(selected)
}
