//! Panel analyzer trait and registry.
//!
//! Each lab panel (blood gas, electrolytes, renal, ...) implements
//! [`PanelAnalyzer`]; the registry provides case-insensitive lookup by
//! panel code. There is no default analyzer for unknown codes: a lab
//! panel with no configured interpretation is a caller error, not
//! something to silently approximate.

use std::collections::HashMap;

use cdss_model::{AnalysisResult, PatientContext, RawLabInput};

use crate::cache::{AnalysisCache, CacheKey};

/// Interpretation entry point for one lab panel.
///
/// Implementations are pure request/response transforms: no I/O, no
/// shared mutable state, deterministic for identical inputs.
pub trait PanelAnalyzer: Send + Sync {
    /// Uppercase panel code (e.g. "GASOMETRIA", "ELETROLITOS").
    fn panel_code(&self) -> &'static str;

    /// Human-readable panel name used in narratives and listings.
    fn description(&self) -> &'static str;

    /// Interpret a raw value mapping for this panel.
    fn analyze(&self, input: &RawLabInput, patient: &PatientContext) -> AnalysisResult;

    /// Memoized variant: keyed on the normalized numeric tuple, safe
    /// because outputs depend only on inputs.
    fn analyze_cached(
        &self,
        input: &RawLabInput,
        patient: &PatientContext,
        cache: &AnalysisCache,
    ) -> std::sync::Arc<AnalysisResult> {
        let normalized = cdss_normalize::normalize_values(input);
        let key = CacheKey::new(self.panel_code(), &normalized, patient);
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(panel = self.panel_code(), "analysis cache hit");
            return hit;
        }
        let result = std::sync::Arc::new(self.analyze(input, patient));
        cache.put(key, std::sync::Arc::clone(&result));
        result
    }
}

/// Registry of panel analyzers indexed by uppercase panel code.
#[derive(Default)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<&'static str, Box<dyn PanelAnalyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an analyzer under its panel code, replacing any previous
    /// registration for that code.
    pub fn register(&mut self, analyzer: Box<dyn PanelAnalyzer>) {
        self.analyzers.insert(analyzer.panel_code(), analyzer);
    }

    pub fn get(&self, panel_code: &str) -> Option<&dyn PanelAnalyzer> {
        let code = panel_code.trim().to_uppercase();
        self.analyzers.get(code.as_str()).map(|a| a.as_ref())
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Registered panel codes in sorted order for stable listings.
    pub fn panel_codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = self.analyzers.keys().copied().collect();
        codes.sort_unstable();
        codes
    }
}
