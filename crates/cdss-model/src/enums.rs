use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Per-parameter criticality assigned by the stratified threshold
/// classifier. Order matters: bands are evaluated critical first, then
/// significant, then monitoring; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriticalityLevel {
    Critical,
    Significant,
    Monitoring,
    Unknown,
}

impl CriticalityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalityLevel::Critical => "CRITICAL",
            CriticalityLevel::Significant => "SIGNIFICANT",
            CriticalityLevel::Monitoring => "MONITORING",
            CriticalityLevel::Unknown => "UNKNOWN",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, CriticalityLevel::Critical)
    }
}

impl fmt::Display for CriticalityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Patient sex, used by panels with sex-specific reference ranges
/// (hemoglobin, creatinine, eGFR). The acid-base engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M", alias = "m", alias = "MALE", alias = "Male", alias = "MASCULINO")]
    Male,
    #[serde(rename = "F", alias = "f", alias = "FEMALE", alias = "Female", alias = "FEMININO")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    /// Accepts the spellings found in upstream systems: "M", "F",
    /// "MALE"/"FEMALE" and the Portuguese "MASCULINO"/"FEMININO".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" | "MASCULINO" => Ok(Sex::Male),
            "F" | "FEMALE" | "FEMININO" => Ok(Sex::Female),
            other => Err(format!("unrecognized sex: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criticality_orders_critical_first() {
        assert!(CriticalityLevel::Critical < CriticalityLevel::Significant);
        assert!(CriticalityLevel::Significant < CriticalityLevel::Monitoring);
        assert!(CriticalityLevel::Monitoring < CriticalityLevel::Unknown);
    }

    #[test]
    fn sex_parses_common_spellings() {
        assert_eq!("masculino".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" F ".parse::<Sex>(), Ok(Sex::Female));
        assert!("X".parse::<Sex>().is_err());
    }
}
