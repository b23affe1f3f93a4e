//! Pure derived-value calculators.
//!
//! Every function here is algebraic and stateless: it either returns a
//! finite value or `None` when its preconditions are unmet (implausible
//! inputs, zero denominators, out-of-window FiO2). Callers treat `None`
//! as "omit this line of reasoning", never as zero and never as an error.

pub mod compensation;
pub mod gaps;
pub mod hematology;
pub mod oxygenation;
pub mod renal;

pub use compensation::{
    COMPENSATION_TOLERANCE, CompensationStatus, assess_compensation,
    expected_hco3_respiratory_acidosis, expected_hco3_respiratory_alkalosis,
    expected_pco2_metabolic_acidosis, expected_pco2_metabolic_alkalosis,
};
pub use gaps::{anion_gap, anion_gap_elevated, delta_delta};
pub use hematology::{corrected_reticulocytes, reticulocyte_production_index};
pub use oxygenation::{normalize_fio2, pf_ratio};
pub use renal::{bun_creatinine_ratio, corrected_calcium, egfr_ckd_epi};
