//! Oxygenation-related calculators.

/// Lowest physiologic FiO2 fraction (room air).
pub const FIO2_MIN: f64 = 0.21;
pub const FIO2_MAX: f64 = 1.0;

/// Normalize a supplied FiO2 into the [0.21, 1.0] fraction window.
///
/// Values above 1.0 are assumed to be percentages and divided by 100.
/// Anything outside the window after normalization is rejected; the
/// caller emits an explicit cannot-compute narrative instead of a number.
pub fn normalize_fio2(fio2: f64) -> Option<f64> {
    let fraction = if fio2 > FIO2_MAX { fio2 / 100.0 } else { fio2 };
    if (FIO2_MIN..=FIO2_MAX).contains(&fraction) {
        Some(fraction)
    } else {
        None
    }
}

/// P/F ratio: pO2 divided by the normalized FiO2 fraction.
pub fn pf_ratio(po2: f64, fio2: f64) -> Option<f64> {
    let fraction = normalize_fio2(fio2)?;
    Some(po2 / fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_fio2_is_scaled() {
        assert_eq!(normalize_fio2(100.0), Some(1.0));
        assert_eq!(normalize_fio2(40.0), Some(0.4));
        assert_eq!(normalize_fio2(0.5), Some(0.5));
    }

    #[test]
    fn out_of_window_fio2_is_rejected() {
        assert_eq!(normalize_fio2(0.1), None);
        assert_eq!(normalize_fio2(15.0), None); // 15% is below room air
        assert_eq!(normalize_fio2(150.0), None);
    }

    #[test]
    fn pf_ratio_with_full_oxygen() {
        // FiO2 supplied as 100 means 1.0, so P/F equals pO2.
        assert_eq!(pf_ratio(55.0, 100.0), Some(55.0));
    }

    #[test]
    fn pf_ratio_room_air() {
        let ratio = pf_ratio(84.0, 0.21).expect("room air ratio");
        assert!((ratio - 400.0).abs() < 1.0);
    }
}
