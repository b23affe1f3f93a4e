//! Request and report payload types for the CLI boundary.

use serde::{Deserialize, Serialize};

use cdss_model::{AnalysisResult, PatientContext, RawLabInput, Sex};

/// A single analysis request as read from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    /// Panel code (e.g. "GASOMETRIA"); may be overridden on the CLI.
    #[serde(default)]
    pub panel: Option<String>,
    /// Raw parameter mapping in the panel's vocabulary.
    pub values: RawLabInput,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<Sex>,
}

impl AnalyzeRequest {
    pub fn patient(&self) -> PatientContext {
        PatientContext {
            age: self.age,
            sex: self.sex,
        }
    }
}

pub const REPORT_SCHEMA: &str = "cdss.analysis-report";
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// JSON report written by `--output`.
#[derive(Debug, Serialize)]
pub struct AnalysisReportPayload {
    pub schema: &'static str,
    pub schema_version: u32,
    pub generated_at: String,
    pub panel: String,
    pub result: AnalysisResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdss_model::LabValue;

    #[test]
    fn request_deserializes_mixed_values() {
        let json = r#"{
            "panel": "GASOMETRIA",
            "values": {"pH": 7.25, "pCO2": "60", "Lactato": "4,5"},
            "age": 67,
            "sex": "F"
        }"#;
        let request: AnalyzeRequest = serde_json::from_str(json).expect("valid request");
        assert_eq!(request.panel.as_deref(), Some("GASOMETRIA"));
        assert_eq!(request.values.get("pH"), Some(&LabValue::Numeric(7.25)));
        assert_eq!(request.patient().age, Some(67));
        assert_eq!(request.patient().sex, Some(Sex::Female));
    }

    #[test]
    fn panel_is_optional_in_the_file() {
        let json = r#"{"values": {"pH": 7.4}}"#;
        let request: AnalyzeRequest = serde_json::from_str(json).expect("valid request");
        assert!(request.panel.is_none());
    }
}
