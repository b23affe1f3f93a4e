//! End-to-end tests for the blood gas facade.

use cdss_engine::{AnalysisCache, PanelAnalyzer};
use cdss_model::{LabValue, PatientContext, raw_input};
use cdss_panels::BloodGasAnalyzer;
use cdss_panels::default_registry;

fn analyze(input: &cdss_model::RawLabInput) -> cdss_model::AnalysisResult {
    BloodGasAnalyzer.analyze(input, &PatientContext::new())
}

#[test]
fn acute_respiratory_acidosis() {
    let input = raw_input([("pH", 7.25), ("pCO2", 60.0), ("HCO3-", 24.0)]);
    let result = analyze(&input);

    assert!(result.interpretation.contains("Acidemia"));
    assert!(result.interpretation.contains("Acidose Respiratória"));
    // Expected HCO3 ≈ 26; actual 24 is inside the ±2 band, so no
    // concomitant metabolic disturbance.
    assert!(!result.interpretation.contains("Acidose Metabólica"));
    assert!(!result.is_critical, "pH 7.25 is not below the 7.20 gate");
}

#[test]
fn severe_acidemia_sets_critical() {
    let input = raw_input([("pH", 7.15), ("pCO2", 40.0), ("HCO3-", 24.0)]);
    let result = analyze(&input);
    assert!(result.is_critical);
}

#[test]
fn pf_ratio_staging_flags_severe_ards() {
    let input = raw_input([
        ("pH", 7.32),
        ("pCO2", 48.0),
        ("pO2", 55.0),
        ("FiO2", 100.0),
    ]);
    let result = analyze(&input);

    assert_eq!(result.details.get("P/F").and_then(|v| v.as_number()), Some(55.0));
    assert!(result.abnormalities.contains("SDRA Grave"));
    assert!(result.is_critical);
}

#[test]
fn missing_data_returns_canned_result_not_error() {
    let input = raw_input([("pH", 7.4)]);
    let result = analyze(&input);
    assert!(result.is_insufficient());
    assert!(result.interpretation.contains("Dados insuficientes"));
}

#[test]
fn details_round_trip_every_parsed_value() {
    let input = raw_input([
        ("pH", LabValue::from("7,31")),
        ("pCO2", LabValue::Numeric(50.0)),
        ("HCO3-", LabValue::Numeric(23.0)),
        ("Na+", LabValue::Numeric(140.0)),
        ("Cl-", LabValue::Numeric(100.0)),
        ("Lactato", LabValue::from("3,1")),
        ("Ruído", LabValue::from("não numérico")),
    ]);
    let result = analyze(&input);

    for key in ["pH", "pCO2", "HCO3-", "Na+", "Cl-", "Lactato"] {
        assert!(result.details.contains_key(key), "missing detail for {key}");
        assert!(
            result.details.contains_key(&format!("{key}_ref")),
            "missing reference for {key}"
        );
    }
    // Derived from Na/Cl/HCO3.
    assert!(result.details.contains_key("Anion Gap"));
    // Unparseable and unknown keys never reach the detail map.
    assert!(!result.details.contains_key("Ruído"));
}

#[test]
fn criticality_is_never_reset_by_later_findings() {
    // Critical pH with an otherwise bland remainder of the panel.
    let input = raw_input([
        ("pH", 7.12),
        ("pCO2", 60.0),
        ("HCO3-", 18.0),
        ("pO2", 95.0),
        ("Lactato", 1.0),
    ]);
    let result = analyze(&input);
    assert!(result.is_critical);
}

#[test]
fn registry_and_cache_round_trip() {
    let registry = default_registry();
    let analyzer = registry.get("gasometria").expect("panel registered");
    let cache = AnalysisCache::default();
    let input = raw_input([("pH", 7.25), ("pCO2", 60.0), ("HCO3-", 24.0)]);
    let patient = PatientContext::new();

    let first = analyzer.analyze_cached(&input, &patient, &cache);
    let second = analyzer.analyze_cached(&input, &patient, &cache);
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    // Equivalent inputs in a different textual locale hit the same entry.
    let comma_input = raw_input([
        ("pH", LabValue::from("7,25")),
        ("pCO2", LabValue::from("60")),
        ("HCO3-", LabValue::from("24")),
    ]);
    let third = analyzer.analyze_cached(&comma_input, &patient, &cache);
    assert!(std::sync::Arc::ptr_eq(&first, &third));
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cached_and_uncached_results_agree() {
    let cache = AnalysisCache::default();
    let input = raw_input([("pH", 7.15), ("pCO2", 70.0), ("HCO3-", 20.0)]);
    let patient = PatientContext::new();

    let direct = BloodGasAnalyzer.analyze(&input, &patient);
    let cached = BloodGasAnalyzer.analyze_cached(&input, &patient, &cache);
    assert_eq!(*cached, direct);
}
