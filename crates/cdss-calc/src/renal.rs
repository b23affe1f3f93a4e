//! Renal and calcium calculators.

use cdss_model::Sex;

/// Albumin-corrected calcium: Ca + 0.8 * (4.0 - albumin), g/dL.
///
/// Only computed for a plausible albumin (0 < albumin < 8 g/dL); outside
/// that window the measurement is more likely a unit or entry error than
/// a physiologic value.
pub fn corrected_calcium(calcium: f64, albumin: f64) -> Option<f64> {
    if albumin <= 0.0 || albumin >= 8.0 {
        return None;
    }
    Some(calcium + 0.8 * (4.0 - albumin))
}

/// BUN/creatinine ratio. Undefined for zero creatinine.
pub fn bun_creatinine_ratio(bun: f64, creatinine: f64) -> Option<f64> {
    if creatinine == 0.0 {
        return None;
    }
    Some(bun / creatinine)
}

/// Estimated glomerular filtration rate, CKD-EPI 2021 (race-free),
/// mL/min/1.73m². Needs serum creatinine (mg/dL), age in years and sex.
pub fn egfr_ckd_epi(creatinine: f64, age: u32, sex: Sex) -> Option<f64> {
    if creatinine <= 0.0 || age == 0 {
        return None;
    }
    let (kappa, alpha, sex_factor) = match sex {
        Sex::Female => (0.7, -0.241, 1.012),
        Sex::Male => (0.9, -0.302, 1.0),
    };
    let ratio = creatinine / kappa;
    let egfr = 142.0
        * ratio.min(1.0).powf(alpha)
        * ratio.max(1.0).powf(-1.200)
        * 0.9938_f64.powi(age as i32)
        * sex_factor;
    Some(egfr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrected_calcium_for_hypoalbuminemia() {
        // Ca 8.0 with albumin 2.0 corrects to 9.6.
        let corrected = corrected_calcium(8.0, 2.0).expect("plausible albumin");
        assert!((corrected - 9.6).abs() < 1e-9);
    }

    #[test]
    fn corrected_calcium_rejects_implausible_albumin() {
        assert_eq!(corrected_calcium(8.0, 0.0), None);
        assert_eq!(corrected_calcium(8.0, 9.0), None);
    }

    #[test]
    fn bun_creatinine_ratio_guards_zero() {
        assert_eq!(bun_creatinine_ratio(40.0, 0.0), None);
        assert_eq!(bun_creatinine_ratio(40.0, 2.0), Some(20.0));
    }

    #[test]
    fn egfr_normal_young_adult() {
        // Creatinine 0.9 mg/dL, male, 30 years: well above the CKD cutoff.
        let egfr = egfr_ckd_epi(0.9, 30, Sex::Male).expect("valid inputs");
        assert!(egfr > 90.0, "expected normal eGFR, got {egfr}");
    }

    #[test]
    fn egfr_falls_with_creatinine() {
        let normal = egfr_ckd_epi(0.9, 60, Sex::Female).expect("normal");
        let impaired = egfr_ckd_epi(2.5, 60, Sex::Female).expect("impaired");
        assert!(impaired < normal);
        assert!(impaired < 30.0, "creatinine 2.5 at 60y should be stage 4, got {impaired}");
    }
}
