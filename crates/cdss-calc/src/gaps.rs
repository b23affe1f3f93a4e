//! Anion gap and delta-delta ratio.

/// Normal anion gap interval (mEq/L, without potassium). The midpoint
/// anchors the delta-delta numerator.
pub const ANION_GAP_LOW: f64 = 8.0;
pub const ANION_GAP_HIGH: f64 = 16.0;

/// Upper bound of the normal HCO3 interval (mEq/L); anchors the
/// delta-delta denominator.
pub const HCO3_UPPER_NORMAL: f64 = 26.0;

/// Anion gap = Na - (Cl + HCO3).
pub fn anion_gap(na: f64, cl: f64, hco3: f64) -> f64 {
    na - (cl + hco3)
}

/// True when the anion gap exceeds the configured normal interval.
pub fn anion_gap_elevated(gap: f64) -> bool {
    gap > ANION_GAP_HIGH
}

/// Delta-delta ratio: rise in anion gap over fall in bicarbonate.
///
/// Undefined when the measured HCO3 sits exactly on the upper normal
/// bound (zero denominator); returns `None`, never infinity.
pub fn delta_delta(gap: f64, hco3: f64) -> Option<f64> {
    let numerator = gap - (ANION_GAP_LOW + ANION_GAP_HIGH) / 2.0;
    let denominator = HCO3_UPPER_NORMAL - hco3;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anion_gap_reference_case() {
        // Na=140, Cl=100, HCO3=24 is the canonical normal-gap example.
        assert_eq!(anion_gap(140.0, 100.0, 24.0), 16.0);
        assert!(!anion_gap_elevated(16.0));
        assert!(anion_gap_elevated(16.1));
    }

    #[test]
    fn delta_delta_guards_zero_denominator() {
        assert_eq!(delta_delta(24.0, HCO3_UPPER_NORMAL), None);
    }

    #[test]
    fn delta_delta_pure_agma_is_near_one() {
        // Gap rose by 10 (12 -> 22) while HCO3 fell by 10 (26 -> 16).
        let ratio = delta_delta(22.0, 16.0).expect("defined ratio");
        assert!((ratio - 1.0).abs() < 1e-9);
    }
}
