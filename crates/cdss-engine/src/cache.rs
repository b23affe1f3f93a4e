//! Memoization of analysis results.
//!
//! Interpretation is a pure function of the normalized inputs, so a cache
//! hit and a miss-plus-recompute are indistinguishable to callers. The
//! cache is an explicit object owned by whoever orchestrates the
//! analyzers (no process-wide state), bounded LRU, and safe to share
//! across threads behind its internal mutex.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use cdss_model::{AnalysisResult, NormalizedParameters, PatientContext};

/// Cache key: panel code plus the exact tuple of normalized numeric
/// inputs (bit-pattern identity, so 0.0 and -0.0 are distinct keys, a
/// harmless over-split for a pure cache) and the patient context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    panel: String,
    inputs: Vec<(String, u64)>,
    patient: PatientContext,
}

impl CacheKey {
    pub fn new(panel: &str, values: &NormalizedParameters, patient: &PatientContext) -> Self {
        Self {
            panel: panel.to_uppercase(),
            inputs: values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_bits()))
                .collect(),
            patient: *patient,
        }
    }
}

/// Bounded LRU store of completed analyses.
pub struct AnalysisCache {
    inner: Mutex<LruCache<CacheKey, Arc<AnalysisResult>>>,
}

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

impl AnalysisCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).expect("nonzero default"));
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<AnalysisResult>> {
        self.lock().get(key).cloned()
    }

    pub fn put(&self, key: CacheKey, result: Arc<AnalysisResult>) {
        self.lock().put(key, result);
    }

    /// Fetch the cached result or compute and store it. Computation runs
    /// outside the lock; a racing duplicate computation is acceptable
    /// because results are deterministic.
    pub fn get_or_compute(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> AnalysisResult,
    ) -> Arc<AnalysisResult> {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        let result = Arc::new(compute());
        self.put(key, Arc::clone(&result));
        result
    }

    /// Drop every entry; exposed for tests and long-lived processes.
    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, Arc<AnalysisResult>>> {
        // A poisoned lock only means another thread panicked mid-insert;
        // the cache content is still a valid LRU, so recover it.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn key(panel: &str, ph: f64) -> CacheKey {
        let mut values = BTreeMap::new();
        values.insert("pH".to_string(), ph);
        CacheKey::new(panel, &values, &PatientContext::new())
    }

    #[test]
    fn hit_returns_stored_result() {
        let cache = AnalysisCache::new(4);
        let mut computed = 0;
        let first = cache.get_or_compute(key("GASOMETRIA", 7.4), || {
            computed += 1;
            AnalysisResult::default()
        });
        let second = cache.get_or_compute(key("GASOMETRIA", 7.4), || {
            computed += 1;
            AnalysisResult::default()
        });
        assert_eq!(computed, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_inputs_miss() {
        let cache = AnalysisCache::new(4);
        cache.get_or_compute(key("GASOMETRIA", 7.4), AnalysisResult::default);
        cache.get_or_compute(key("GASOMETRIA", 7.2), AnalysisResult::default);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_evicts_least_recently_used() {
        let cache = AnalysisCache::new(2);
        cache.get_or_compute(key("GASOMETRIA", 7.1), AnalysisResult::default);
        cache.get_or_compute(key("GASOMETRIA", 7.2), AnalysisResult::default);
        cache.get_or_compute(key("GASOMETRIA", 7.3), AnalysisResult::default);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("GASOMETRIA", 7.1)).is_none());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = AnalysisCache::default();
        cache.get_or_compute(key("GASOMETRIA", 7.4), AnalysisResult::default);
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn panel_code_is_case_insensitive_in_keys() {
        assert_eq!(key("gasometria", 7.4), key("GASOMETRIA", 7.4));
    }
}
