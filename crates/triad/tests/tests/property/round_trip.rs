//! Property tests: table totality, result round-trip and Core determinism.

use proptest::prelude::*;
use triad_classifier::{InstanceClassifier, ResolverConfig};
use triad_engine::EngineConfig;
use triad_tests::orchestrator;
use triad_types::{
    AnalysisInput, ArchetypeId, CategoricalAnswer, CombinationTable, Facet, InstanceRole,
    ReferenceData, SelectionMode,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate one of the eight facets.
fn arb_facet() -> impl Strategy<Value = Facet> {
    (0usize..8).prop_map(|i| Facet::ALL[i])
}

/// Generate either selection mode.
fn arb_mode() -> impl Strategy<Value = SelectionMode> {
    prop_oneof![Just(SelectionMode::HarmonyBalanced), Just(SelectionMode::Legacy)]
}

/// Generate 1..25 answers with ids under `prefix`, each weighting one to three facets.
fn arb_answers(prefix: &'static str) -> impl Strategy<Value = Vec<CategoricalAnswer>> {
    prop::collection::vec(
        prop::collection::vec((arb_facet(), -2.0f64..6.0), 1..4),
        1..25,
    )
    .prop_map(move |answers| {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, weights)| {
                weights.into_iter().fold(
                    CategoricalAnswer::new(format!("{}{}", prefix, i), "a"),
                    |a, (facet, w)| a.with_weight(facet, w),
                )
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn standard_table_is_total_and_surjective() {
    let table = CombinationTable::king_wen();
    for upper in Facet::ALL {
        for lower in Facet::ALL {
            let id = table.lookup(upper, lower).unwrap();
            assert!((ArchetypeId::MIN..=ArchetypeId::MAX).contains(&id.get()));
        }
    }
    assert_eq!(table.distinct_ids(), 64);
    for id in ArchetypeId::all() {
        let (upper, lower) = table.pair_for(id).unwrap();
        assert_eq!(table.lookup(upper, lower).unwrap(), id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_result_round_trips(
        core in arb_answers("c"),
        scenarios in arb_answers("s"),
        legacy in any::<bool>(),
    ) {
        let config = if legacy { EngineConfig::legacy() } else { EngineConfig::default() };
        let o = orchestrator(config);
        let analysis = o.analyze(&AnalysisInput::new(core, scenarios)).unwrap();
        for role in InstanceRole::ALL {
            let r = analysis.result(role);
            prop_assert_eq!(
                o.reference().combination.lookup(r.upper_facet, r.lower_facet).unwrap(),
                r.archetype_id
            );
            for alt in &r.alternative_candidates {
                prop_assert_eq!(
                    o.reference().combination.lookup(alt.upper_facet, alt.lower_facet).unwrap(),
                    alt.archetype_id
                );
                prop_assert!(alt.harmony_score <= r.harmony_score);
            }
        }
        prop_assert!(analysis.validation.all_passed());
    }

    #[test]
    fn core_is_deterministic(answers in arb_answers("c"), mode in arb_mode()) {
        let reference = ReferenceData::standard();
        let config = ResolverConfig::default();
        let classifier = InstanceClassifier::new(&reference, &config, mode);
        let first = classifier.classify_core(&answers).unwrap();
        let second = classifier.classify_core(&answers).unwrap();
        prop_assert_eq!(first, second);
    }
}
