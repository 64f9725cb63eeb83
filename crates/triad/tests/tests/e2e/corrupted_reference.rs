//! E2E: a corrupted combination table is always reported, never absorbed.

use std::sync::Arc;

use triad_classifier::{InstanceClassifier, ResolverConfig};
use triad_engine::{EngineConfig, MultiInstanceOrchestrator};
use triad_evaluation::ResultValidator;
use triad_tests::{corrupted_reference, corrupted_reference_json, result_for, single_facet_answers};
use triad_types::{
    Facet, FacetEnergyMap, InstanceRole, ReferenceData, SelectionMode, TriadError,
};

#[test]
fn loading_a_zero_cell_fails() {
    let err = ReferenceData::from_json_str(&corrupted_reference_json(Facet::Lake, Facet::Wind, 0))
        .unwrap_err();
    assert_eq!(
        err,
        TriadError::LookupIntegrity {
            upper: Facet::Lake,
            lower: Facet::Wind,
            value: 0
        }
    );
}

#[test]
fn loading_an_out_of_range_cell_fails() {
    let err = ReferenceData::from_json_str(&corrupted_reference_json(Facet::Earth, Facet::Earth, 65))
        .unwrap_err();
    assert!(err.is_integrity_violation());
}

#[test]
fn uncorrupted_json_loads() {
    let json = ReferenceData::standard().to_json_string().unwrap();
    assert_eq!(ReferenceData::from_json_str(&json).unwrap(), ReferenceData::standard());
}

#[test]
fn orchestrator_refuses_corrupted_table() {
    for value in [0, 65] {
        let reference = Arc::new(corrupted_reference(Facet::Mountain, Facet::Heaven, value));
        let err = MultiInstanceOrchestrator::new(reference, EngineConfig::legacy())
            .err()
            .unwrap();
        assert!(matches!(err, TriadError::LookupIntegrity { value: v, .. } if v == value));
    }
}

#[test]
fn harmony_search_hits_the_bad_cell() {
    let reference = corrupted_reference(Facet::Water, Facet::Fire, 65);
    let config = ResolverConfig::default();
    let classifier = InstanceClassifier::new(&reference, &config, SelectionMode::HarmonyBalanced);
    let err = classifier
        .classify_core(&single_facet_answers("c", Facet::Heaven, 1.0, 3))
        .unwrap_err();
    assert!(matches!(
        err,
        TriadError::LookupIntegrity {
            upper: Facet::Water,
            lower: Facet::Fire,
            value: 65
        }
    ));
}

#[test]
fn validator_reports_round_trip_mismatch() {
    let reference = ReferenceData::standard();
    let mut result = result_for(
        InstanceRole::Derived1,
        Facet::Fire,
        Facet::Water,
        FacetEnergyMap::zeros(),
    );
    result.archetype_id = triad_types::ArchetypeId::new(63).unwrap();
    let err = ResultValidator::new(&reference.combination)
        .check(&result)
        .unwrap_err();
    assert!(matches!(
        err,
        TriadError::RoundTripMismatch {
            role: InstanceRole::Derived1,
            archetype_id: 63,
            expected: 64,
            ..
        }
    ));
}
