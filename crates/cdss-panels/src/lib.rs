//! Per-panel lab interpretation facades.
//!
//! Each panel is a [`cdss_engine::PanelAnalyzer`] built from a
//! declarative [`config::PanelConfig`] and the shared evaluation
//! skeleton; the blood gas facade additionally runs the acid-base
//! diagnostic engine.

pub mod blood_gas;
pub mod cardiac;
pub mod config;
pub mod electrolytes;
pub mod evaluate;
pub mod hematology;
pub mod hepatic;
pub mod metabolic;
pub mod registry;
pub mod renal;

pub use blood_gas::BloodGasAnalyzer;
pub use cardiac::CardiacAnalyzer;
pub use config::{PanelConfig, ParameterSpec};
pub use electrolytes::ElectrolytesAnalyzer;
pub use evaluate::evaluate_panel;
pub use hematology::HematologyAnalyzer;
pub use hepatic::HepaticAnalyzer;
pub use metabolic::MetabolicAnalyzer;
pub use registry::default_registry;
pub use renal::RenalAnalyzer;
