pub mod classify;
pub mod numeric;

pub use classify::{Classification, classify};
pub use numeric::{normalize_value, normalize_values};

use thiserror::Error;

/// Why a raw lab value could not be normalized.
///
/// `Missing` covers both absent values and empty strings; the map-level
/// helper treats it as silent absence, while `Unparseable`/`NotFinite`
/// are logged before being treated the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("value is missing")]
    Missing,
    #[error("cannot parse {0:?} as a number")]
    Unparseable(String),
    #[error("number is not finite: {0}")]
    NotFinite(f64),
}
