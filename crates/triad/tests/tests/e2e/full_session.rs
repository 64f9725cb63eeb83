//! E2E: a 24-answer session skewed entirely toward one expressive facet.
//!
//! Core must read that facet at 100 and every other facet at 0, and the
//! Derived1 energy for the facet must not fall below its pre-influence value.

use triad_classifier::{FacetEnergyNormalizer, FeatureVectorBuilder};
use triad_engine::EngineConfig;
use triad_evaluation::AnalysisStatus;
use triad_tests::{orchestrator, single_facet_answers};
use triad_types::{AnalysisInput, Facet, FacetGroup, InstanceRole, SelectionMethod};

fn skewed_session() -> AnalysisInput {
    AnalysisInput::new(
        single_facet_answers("core", Facet::Heaven, 3.0, 24),
        single_facet_answers("scenario", Facet::Heaven, 3.0, 24),
    )
}

#[test]
fn core_energies_follow_the_skew() {
    let analysis = orchestrator(EngineConfig::default())
        .analyze(&skewed_session())
        .unwrap();

    assert_eq!(analysis.core.facet_energy_map[Facet::Heaven], 100.0);
    for facet in Facet::ALL.into_iter().filter(|f| *f != Facet::Heaven) {
        assert_eq!(analysis.core.facet_energy_map[facet], 0.0, "{}", facet);
    }
    assert_eq!(analysis.core.dominant_facet(), Facet::Heaven);
    assert_eq!(analysis.core.archetype_id.get(), 1);
    assert_eq!(analysis.core.selection_method, SelectionMethod::Harmony);
}

#[test]
fn derived1_energy_does_not_drop_below_raw() {
    let input = skewed_session();
    let reference = triad_tests::reference();
    assert_eq!(reference.partition.group(Facet::Heaven), FacetGroup::Expressive);

    let raw = FeatureVectorBuilder::build(&input.scenario_answers);
    let pre_influence = FacetEnergyNormalizer::normalize(&raw).unwrap().energies;
    assert_eq!(pre_influence.peak(), Facet::Heaven);

    let analysis = orchestrator(EngineConfig::default()).analyze(&input).unwrap();
    assert!(
        analysis.derived1.facet_energy_map[Facet::Heaven] >= pre_influence[Facet::Heaven],
        "adjusted {} < raw {}",
        analysis.derived1.facet_energy_map[Facet::Heaven],
        pre_influence[Facet::Heaven]
    );
}

#[test]
fn identical_core_and_derived1_are_reported_as_duplicates() {
    let analysis = orchestrator(EngineConfig::default())
        .analyze(&skewed_session())
        .unwrap();

    assert_eq!(analysis.core.archetype_id, analysis.derived1.archetype_id);
    let duplicates = &analysis.validation.duplicates;
    assert!(duplicates.has_duplicates);
    assert!(duplicates.unique_count < 3);
    assert!(duplicates.duplicate_ids.contains(&analysis.core.archetype_id));
    assert!(analysis.validation.all_passed());
    assert!(!matches!(
        analysis.status,
        AnalysisStatus::Excellent | AnalysisStatus::Good
    ));
}

#[test]
fn every_role_round_trips_and_has_a_reading() {
    let o = orchestrator(EngineConfig::default());
    let analysis = o.analyze(&skewed_session()).unwrap();

    for role in InstanceRole::ALL {
        let r = analysis.result(role);
        assert_eq!(r.role, role);
        assert_eq!(
            o.reference().combination.lookup(r.upper_facet, r.lower_facet).unwrap(),
            r.archetype_id
        );
    }
    let roles: Vec<_> = analysis.readings.iter().map(|r| r.role).collect();
    assert_eq!(roles, InstanceRole::ALL.to_vec());
    assert!(analysis.readings.iter().all(|r| !r.reading.is_empty()));
}

#[test]
fn analysis_serializes_to_json() {
    let analysis = orchestrator(EngineConfig::default())
        .analyze(&skewed_session())
        .unwrap();
    let json = analysis.to_json_string().unwrap();
    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["core"]["archetype_id"], 1);
    assert_eq!(doc["input_digest"].as_str().map(str::len), Some(64));
    let restored: triad_engine::TripleAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.core, analysis.core);
}

#[test]
fn harmony_keeps_the_pure_pair_where_legacy_takes_top_two() {
    let input = skewed_session();
    let harmony = orchestrator(EngineConfig::default()).analyze(&input).unwrap();
    let legacy = orchestrator(EngineConfig::legacy()).analyze(&input).unwrap();

    // every facet but Heaven reads 0, so top-two falls through to Lake
    assert_eq!(legacy.core.facets(), (Facet::Heaven, Facet::Lake));
    assert_eq!(legacy.core.archetype_id.get(), 10);
    assert_eq!(legacy.core.selection_method, SelectionMethod::Legacy);
    assert!(legacy.core.alternative_candidates.is_empty());

    assert_eq!(harmony.core.facets(), (Facet::Heaven, Facet::Heaven));
    assert_eq!(harmony.core.legacy_archetype_id, legacy.core.archetype_id);
    assert!(harmony.core.diverges_from_legacy());
    assert_eq!(harmony.core.alternative_candidates.len(), 3);
}
