//! Property tests: normalized energies always peak at exactly 100.

use proptest::prelude::*;
use triad_classifier::{FacetEnergyNormalizer, FeatureVectorBuilder, UNIFORM_ENERGY};
use triad_types::{CategoricalAnswer, Facet, FeatureVector};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate one of the eight facets.
fn arb_facet() -> impl Strategy<Value = Facet> {
    (0usize..8).prop_map(|i| Facet::ALL[i])
}

/// Raw vector with at least one strictly positive facet.
fn arb_positive_raw() -> impl Strategy<Value = FeatureVector> {
    (prop::array::uniform8(-50.0f64..50.0), arb_facet(), 0.01f64..50.0).prop_map(
        |(values, facet, boost)| {
            let mut raw = FeatureVector::from_array(values);
            raw[facet] = raw[facet].abs() + boost;
            raw
        },
    )
}

/// Generate up to 30 answers, each weighting up to three facets in `-5..5`.
fn arb_answers() -> impl Strategy<Value = Vec<CategoricalAnswer>> {
    prop::collection::vec(
        prop::collection::vec((arb_facet(), -5.0f64..5.0), 0..4),
        0..30,
    )
    .prop_map(|answers| {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, weights)| {
                weights.into_iter().fold(
                    CategoricalAnswer::new(format!("q{}", i), "a"),
                    |a, (facet, w)| a.with_weight(facet, w),
                )
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn positive_raw_peaks_at_hundred(raw in arb_positive_raw()) {
        let normalized = FacetEnergyNormalizer::normalize(&raw).unwrap();
        prop_assert!(!normalized.degraded);
        prop_assert_eq!(normalized.energies.max_value(), 100.0);
        for v in normalized.energies.values() {
            prop_assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn non_positive_raw_is_uniform(values in prop::array::uniform8(-50.0f64..=0.0)) {
        let normalized = FacetEnergyNormalizer::normalize(&FeatureVector::from_array(values)).unwrap();
        prop_assert!(normalized.degraded);
        prop_assert!(normalized.energies.values().all(|v| *v == UNIFORM_ENERGY));
    }

    #[test]
    fn answers_always_normalize_into_range(answers in arb_answers()) {
        let raw = FeatureVectorBuilder::build(&answers);
        let normalized = FacetEnergyNormalizer::normalize(&raw).unwrap();
        prop_assert!(normalized.energies.values().all(|v| (0.0..=100.0).contains(v)));
        if !normalized.degraded {
            prop_assert_eq!(normalized.energies.max_value(), 100.0);
        }
    }
}
