//! Property tests: duplicate archetypes across instances are reported, not fatal.

use proptest::prelude::*;
use triad_evaluation::{ResultSet, ResultValidator};
use triad_tests::{result_for, uniform_energies};
use triad_types::{CombinationTable, Facet, InstanceRole};

/// Generate an ordered (upper, lower) facet pair.
fn arb_pair() -> impl Strategy<Value = (Facet, Facet)> {
    ((0usize..8), (0usize..8)).prop_map(|(u, l)| (Facet::ALL[u], Facet::ALL[l]))
}

proptest! {
    #[test]
    fn shared_core_and_derived1_id_is_a_duplicate(
        shared in arb_pair(),
        other in arb_pair(),
    ) {
        let core = result_for(InstanceRole::Core, shared.0, shared.1, uniform_energies());
        let derived1 = result_for(InstanceRole::Derived1, shared.0, shared.1, uniform_energies());
        let derived2 = result_for(InstanceRole::Derived2, other.0, other.1, uniform_energies());

        let table = CombinationTable::king_wen();
        let report = ResultValidator::new(&table)
            .validate(ResultSet::new(&core, &derived1, &derived2))
            .unwrap();

        prop_assert!(report.duplicates.has_duplicates);
        prop_assert!(report.duplicates.unique_count < 3);
        prop_assert!(report.duplicates.duplicate_ids.contains(&core.archetype_id));
        prop_assert!(report.all_passed());
        prop_assert!(!report.is_clean());
    }

    #[test]
    fn distinct_ids_are_clean(a in arb_pair(), b in arb_pair(), c in arb_pair()) {
        let table = CombinationTable::king_wen();
        let ids = [a, b, c].map(|(u, l)| table.lookup(u, l).unwrap());
        prop_assume!(ids[0] != ids[1] && ids[0] != ids[2] && ids[1] != ids[2]);

        let core = result_for(InstanceRole::Core, a.0, a.1, uniform_energies());
        let derived1 = result_for(InstanceRole::Derived1, b.0, b.1, uniform_energies());
        let derived2 = result_for(InstanceRole::Derived2, c.0, c.1, uniform_energies());
        let report = ResultValidator::new(&table)
            .validate(ResultSet::new(&core, &derived1, &derived2))
            .unwrap();

        prop_assert!(!report.duplicates.has_duplicates);
        prop_assert_eq!(report.duplicates.unique_count, 3);
        prop_assert!(report.is_clean());
    }
}
