//! E2E: inputs that degrade or default an instance without failing the run.

use triad_classifier::{InstanceClassifier, ResolverConfig, UNIFORM_ENERGY};
use triad_engine::EngineConfig;
use triad_evaluation::{AnalysisStatus, RecommendationKind};
use triad_tests::{orchestrator, single_facet_answers};
use triad_types::{
    AnalysisInput, CategoricalAnswer, Facet, InstanceRole, ReferenceData, SelectionMethod,
    SelectionMode, TriadError,
};

#[test]
fn zero_answers_yield_uniform_degraded_core() {
    let reference = ReferenceData::standard();
    let config = ResolverConfig::default();
    let classifier = InstanceClassifier::new(&reference, &config, SelectionMode::HarmonyBalanced);

    let result = classifier.classify_core(&[]).unwrap();
    assert!(result.degraded);
    assert!(result.facet_energy_map.values().all(|v| *v == UNIFORM_ENERGY));
}

#[test]
fn empty_session_is_invalid_input() {
    let err = orchestrator(EngineConfig::default())
        .analyze(&AnalysisInput::default())
        .unwrap_err();
    assert!(matches!(err, TriadError::InvalidInput(_)));
}

#[test]
fn scenarios_only_session_degrades_core() {
    let input = AnalysisInput::new(vec![], single_facet_answers("s", Facet::Wind, 1.0, 6));
    let analysis = orchestrator(EngineConfig::default()).analyze(&input).unwrap();

    assert!(analysis.core.degraded);
    assert!(analysis.core.facet_energy_map.values().all(|v| *v == UNIFORM_ENERGY));
    assert!(analysis.validation.degraded_roles.contains(&InstanceRole::Core));
    assert!(analysis
        .interaction
        .recommendations
        .iter()
        .any(|r| r.kind == RecommendationKind::CompleteInput));
}

#[test]
fn non_finite_scenario_weight_defaults_both_derived_instances() {
    let mut scenarios = single_facet_answers("s", Facet::Lake, 2.0, 4);
    scenarios.push(CategoricalAnswer::new("s-bad", "x").with_weight(Facet::Fire, f64::INFINITY));
    let input = AnalysisInput::new(single_facet_answers("c", Facet::Thunder, 1.0, 4), scenarios);

    let analysis = orchestrator(EngineConfig::default()).analyze(&input).unwrap();

    assert_eq!(analysis.core.selection_method, SelectionMethod::Harmony);
    assert_eq!(analysis.derived1.selection_method, SelectionMethod::Defaulted);
    assert_eq!(analysis.derived2.selection_method, SelectionMethod::Defaulted);
    assert_eq!(analysis.derived1.archetype_id.get(), 11);
    assert_eq!(analysis.derived2.archetype_id.get(), 39);
    assert!(analysis.stress_profile.responses.is_empty());
    assert_eq!(
        analysis.validation.defaulted_roles,
        vec![InstanceRole::Derived1, InstanceRole::Derived2]
    );
    assert_eq!(analysis.status, AnalysisStatus::NeedsImprovement);
}

#[test]
fn nan_core_weight_defaults_core_only() {
    let mut core = single_facet_answers("c", Facet::Earth, 1.0, 3);
    core.push(CategoricalAnswer::new("c-bad", "x").with_weight(Facet::Earth, f64::NAN));
    let input = AnalysisInput::new(core, single_facet_answers("s", Facet::Water, 1.0, 3));

    let analysis = orchestrator(EngineConfig::default()).analyze(&input).unwrap();

    assert!(analysis.core.is_defaulted());
    assert_eq!(analysis.core.archetype_id.get(), 1);
    assert!(!analysis.derived1.is_defaulted());
    assert!(!analysis.derived2.is_defaulted());
    assert!(analysis.validation.all_passed());
}

#[test]
fn repeated_question_is_rejected() {
    let mut core = single_facet_answers("c", Facet::Earth, 1.0, 3);
    core.push(CategoricalAnswer::new("c-0", "b"));
    let err = orchestrator(EngineConfig::default())
        .analyze(&AnalysisInput::new(core, vec![]))
        .unwrap_err();
    assert!(matches!(err, TriadError::InvalidInput(msg) if msg.contains("c-0")));
}
