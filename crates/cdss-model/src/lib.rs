pub mod enums;
pub mod error;
pub mod patient;
pub mod reference;
pub mod result;
pub mod thresholds;
pub mod value;

pub use enums::{CriticalityLevel, Sex};
pub use error::{CdssError, Result};
pub use patient::PatientContext;
pub use reference::{ReferenceRange, ReferenceSpec};
pub use result::{AnalysisResult, DetailValue};
pub use thresholds::{ThresholdBand, ThresholdConfig, ThresholdSpec};
pub use value::{LabValue, NormalizedParameters, RawLabInput, raw_input};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shapes_deserialize_from_json() {
        let json = r#"{"pH": 7.25, "pCO2": "60", "Lactato": "4,5", "obs": "<5"}"#;
        let input: RawLabInput = serde_json::from_str(json).expect("deserialize input");
        assert_eq!(input.get("pH"), Some(&LabValue::Numeric(7.25)));
        assert_eq!(input.get("pCO2"), Some(&LabValue::Text("60".to_string())));
        assert_eq!(input.get("obs"), Some(&LabValue::Text("<5".to_string())));
    }

    #[test]
    fn patient_context_deserializes_with_defaults() {
        let patient: PatientContext = serde_json::from_str("{}").expect("empty context");
        assert_eq!(patient, PatientContext::new());

        let patient: PatientContext =
            serde_json::from_str(r#"{"age": 67, "sex": "F"}"#).expect("full context");
        assert_eq!(patient.age, Some(67));
        assert_eq!(patient.sex, Some(Sex::Female));
    }
}
