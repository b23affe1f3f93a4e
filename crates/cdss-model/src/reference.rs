use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::Sex;
use crate::patient::PatientContext;

/// A closed normal interval for one parameter, with the unit used when the
/// range is echoed into the detail map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
    pub unit: Option<String>,
}

impl ReferenceRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn is_below(&self, value: f64) -> bool {
        value < self.low
    }

    pub fn is_above(&self, value: f64) -> bool {
        value > self.high
    }

    /// Human-readable text stored under the `*_ref` detail keys.
    pub fn display(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{}-{} {}", self.low, self.high, unit),
            None => format!("{}-{}", self.low, self.high),
        }
    }
}

impl fmt::Display for ReferenceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A reference range that may vary by patient sex. Age-specific ranges are
/// resolved the same way when a panel needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSpec {
    pub default: ReferenceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male: Option<ReferenceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female: Option<ReferenceRange>,
}

impl ReferenceSpec {
    pub fn uniform(range: ReferenceRange) -> Self {
        Self {
            default: range,
            male: None,
            female: None,
        }
    }

    pub fn by_sex(default: ReferenceRange, male: ReferenceRange, female: ReferenceRange) -> Self {
        Self {
            default,
            male: Some(male),
            female: Some(female),
        }
    }

    /// Resolve the range for a patient, falling back to the default when
    /// sex is unknown or no sex-specific range is configured.
    pub fn resolve(&self, patient: &PatientContext) -> &ReferenceRange {
        match patient.sex {
            Some(Sex::Male) => self.male.as_ref().unwrap_or(&self.default),
            Some(Sex::Female) => self.female.as_ref().unwrap_or(&self.default),
            None => &self.default,
        }
    }
}
