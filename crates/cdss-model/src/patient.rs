use serde::{Deserialize, Serialize};

use crate::enums::Sex;

/// Optional patient demographics accompanying an analysis request.
///
/// Only panels with sex- or age-specific reference ranges consult this;
/// everything is optional and absence simply falls back to the default
/// ranges (or omits age-dependent derivations such as eGFR).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

impl PatientContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }
}
