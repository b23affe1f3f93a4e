//! Default analyzer registry wiring every panel facade.

use std::sync::OnceLock;

use cdss_engine::AnalyzerRegistry;

use crate::blood_gas::BloodGasAnalyzer;
use crate::cardiac::CardiacAnalyzer;
use crate::electrolytes::ElectrolytesAnalyzer;
use crate::hematology::HematologyAnalyzer;
use crate::hepatic::HepaticAnalyzer;
use crate::metabolic::MetabolicAnalyzer;
use crate::renal::RenalAnalyzer;

/// Registry with every standard panel registered, cached on first use.
pub fn default_registry() -> &'static AnalyzerRegistry {
    static REGISTRY: OnceLock<AnalyzerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> AnalyzerRegistry {
    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(BloodGasAnalyzer));
    registry.register(Box::new(ElectrolytesAnalyzer));
    registry.register(Box::new(RenalAnalyzer));
    registry.register(Box::new(HepaticAnalyzer));
    registry.register(Box::new(HematologyAnalyzer));
    registry.register(Box::new(CardiacAnalyzer));
    registry.register(Box::new(MetabolicAnalyzer));
    registry
}
