//! Hematology calculators.

/// Reference hematocrit used to correct the raw reticulocyte percentage.
pub const HEMATOCRIT_REFERENCE: f64 = 45.0;

/// Corrected reticulocyte count: retic% * (Ht / 45).
pub fn corrected_reticulocytes(retic_pct: f64, hematocrit: f64) -> Option<f64> {
    if hematocrit <= 0.0 {
        return None;
    }
    Some(retic_pct * hematocrit / HEMATOCRIT_REFERENCE)
}

/// Maturation factor staged by hematocrit; divides the corrected count to
/// yield the reticulocyte production index.
fn maturation_factor(hematocrit: f64) -> f64 {
    if hematocrit >= 45.0 {
        1.0
    } else if hematocrit >= 35.0 {
        1.5
    } else if hematocrit >= 25.0 {
        2.0
    } else {
        2.5
    }
}

/// Reticulocyte production index (RPI). An RPI below 2 in anemia points
/// to a hypoproliferative marrow; above 3 to hemolysis or blood loss
/// with an adequate marrow response.
pub fn reticulocyte_production_index(retic_pct: f64, hematocrit: f64) -> Option<f64> {
    let corrected = corrected_reticulocytes(retic_pct, hematocrit)?;
    Some(corrected / maturation_factor(hematocrit))
}
