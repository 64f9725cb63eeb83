//! Property tests: raising Core's energy for a facet never lowers the
//! derived instance's adjusted energy for that facet.

use proptest::prelude::*;
use triad_classifier::{CrossInstanceInfluenceAdjuster, InfluenceProfile};
use triad_tests::core_with_energies;
use triad_types::{Facet, FacetEnergyMap, FacetPartition};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate one of the eight facets.
fn arb_facet() -> impl Strategy<Value = Facet> {
    (0usize..8).prop_map(|i| Facet::ALL[i])
}

/// Generate an energy map with every facet in `[0, 100]`.
fn arb_energies() -> impl Strategy<Value = FacetEnergyMap> {
    prop::array::uniform8(0.0f64..=100.0).prop_map(FacetEnergyMap::from_array)
}

/// Generate the Derived1 or the Derived2 influence profile.
fn arb_profile() -> impl Strategy<Value = InfluenceProfile> {
    prop_oneof![
        Just(InfluenceProfile::derived1()),
        Just(InfluenceProfile::derived2()),
    ]
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn adjusted_energy_is_monotone_in_core(
        raw in arb_energies(),
        core in arb_energies(),
        facet in arb_facet(),
        raise in 0.0f64..=100.0,
        profile in arb_profile(),
    ) {
        let partition = FacetPartition::standard();
        let adjuster = CrossInstanceInfluenceAdjuster::new(&partition);

        let mut raised = core;
        raised[facet] = (core[facet] + raise).min(100.0);

        let before = adjuster.adjust(&raw, &core_with_energies(core), &profile).unwrap();
        let after = adjuster.adjust(&raw, &core_with_energies(raised), &profile).unwrap();
        prop_assert!(
            after[facet] >= before[facet],
            "{}: {} -> {}", facet, before[facet], after[facet]
        );
    }

    #[test]
    fn adjusted_energies_stay_in_range(
        raw in arb_energies(),
        core in arb_energies(),
        profile in arb_profile(),
    ) {
        let partition = FacetPartition::standard();
        let adjusted = CrossInstanceInfluenceAdjuster::new(&partition)
            .adjust(&raw, &core_with_energies(core), &profile)
            .unwrap();
        prop_assert!(adjusted.values().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn linear_profile_stays_between_raw_and_core(
        raw in arb_energies(),
        core in arb_energies(),
        facet in arb_facet(),
    ) {
        let partition = FacetPartition::standard();
        let adjusted = CrossInstanceInfluenceAdjuster::new(&partition)
            .adjust(&raw, &core_with_energies(core), &InfluenceProfile::derived2())
            .unwrap();
        let lo = raw[facet].min(core[facet]);
        let hi = raw[facet].max(core[facet]);
        prop_assert!(adjusted[facet] >= lo - 1e-9 && adjusted[facet] <= hi + 1e-9);
    }
}
