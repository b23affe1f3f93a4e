use serde::{Deserialize, Serialize};

/// A single matching condition inside a criticality band.
///
/// `Range` matches by inclusive containment. `Magnitude` is a single-sided
/// comparison where the sign encodes direction: negative means "below the
/// absolute value", positive means "above the value".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdBand {
    Range { low: f64, high: f64 },
    Magnitude(f64),
}

impl ThresholdBand {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            ThresholdBand::Range { low, high } => value >= low && value <= high,
            ThresholdBand::Magnitude(magnitude) => {
                if magnitude < 0.0 {
                    value < magnitude.abs()
                } else {
                    value > magnitude
                }
            }
        }
    }
}

/// A band paired with the narrative emitted when it matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub band: ThresholdBand,
    pub description: String,
}

impl ThresholdSpec {
    pub fn range(low: f64, high: f64, description: impl Into<String>) -> Self {
        Self {
            band: ThresholdBand::Range { low, high },
            description: description.into(),
        }
    }

    pub fn below(limit: f64, description: impl Into<String>) -> Self {
        Self {
            band: ThresholdBand::Magnitude(-limit),
            description: description.into(),
        }
    }

    pub fn above(limit: f64, description: impl Into<String>) -> Self {
        Self {
            band: ThresholdBand::Magnitude(limit),
            description: description.into(),
        }
    }
}

/// Ordered classification bands for one parameter. Any subset may be
/// empty; evaluation order is fixed (critical, significant, monitoring)
/// and the first matching spec wins regardless of overlap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(default)]
    pub critical: Vec<ThresholdSpec>,
    #[serde(default)]
    pub significant: Vec<ThresholdSpec>,
    #[serde(default)]
    pub monitoring: Vec<ThresholdSpec>,
}

impl ThresholdConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_critical(mut self, specs: impl IntoIterator<Item = ThresholdSpec>) -> Self {
        self.critical.extend(specs);
        self
    }

    pub fn with_significant(mut self, specs: impl IntoIterator<Item = ThresholdSpec>) -> Self {
        self.significant.extend(specs);
        self
    }

    pub fn with_monitoring(mut self, specs: impl IntoIterator<Item = ThresholdSpec>) -> Self {
        self.monitoring.extend(specs);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.significant.is_empty() && self.monitoring.is_empty()
    }
}
