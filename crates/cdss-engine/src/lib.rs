pub mod acid_base;
pub mod analyzer;
pub mod assembler;
pub mod cache;

pub use acid_base::{AcidBaseFindings, BloodGasValues, evaluate};
pub use analyzer::{AnalyzerRegistry, PanelAnalyzer};
pub use assembler::ResultAssembler;
pub use cache::{AnalysisCache, CacheKey, DEFAULT_CACHE_CAPACITY};
