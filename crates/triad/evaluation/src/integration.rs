//! Integration: how well the three results fit together as a whole.

use std::collections::BTreeSet;
use triad_types::{ArchetypeId, ClassifierResult, Facet, Level, ReferenceData};

use crate::config::IntegrationWeights;
use crate::types::{IntegrationBreakdown, ResultSet};

pub fn score(
    results: ResultSet<'_>,
    reference: &ReferenceData,
    weights: &IntegrationWeights,
) -> IntegrationBreakdown {
    let meaning = meaning(results, reference);
    let levels = levels(results);
    let symmetry = symmetry(results, reference);
    let synergy = synergy(results);
    let score = (weights.meaning * meaning
        + weights.levels * levels
        + weights.symmetry * symmetry
        + weights.synergy * synergy)
        .clamp(0.0, 100.0);

    IntegrationBreakdown {
        meaning,
        levels,
        symmetry,
        synergy,
        score,
    }
}

/// Mean energy each result carries on its archetype's canonical facets.
pub fn meaning(results: ResultSet<'_>, reference: &ReferenceData) -> f64 {
    results
        .all()
        .iter()
        .map(|r| {
            let (upper, lower) = reference
                .combination
                .pair_for(r.archetype_id)
                .unwrap_or_else(|| r.facets());
            let e = &r.facet_energy_map;
            if upper == lower {
                e[upper]
            } else {
                (e[upper] + e[lower]) / 2.0
            }
        })
        .sum::<f64>()
        / 3.0
}

fn role_level_fit(result: &ClassifierResult) -> f64 {
    let expected = result.role.level();
    if result.dominant_facet().level() == expected {
        100.0
    } else if result.lower_facet.level() == expected {
        60.0
    } else {
        30.0
    }
}

/// Each role expressing its own level, blended with level coverage.
pub fn levels(results: ResultSet<'_>) -> f64 {
    let all = results.all();
    let fit = all.iter().map(|r| role_level_fit(r)).sum::<f64>() / 3.0;
    let distinct: BTreeSet<Level> = all.iter().map(|r| r.dominant_facet().level()).collect();
    let coverage = distinct.len() as f64 / 3.0 * 100.0;
    0.5 * fit + 0.5 * coverage
}

fn pair_symmetry(a: Facet, b: Facet, reference: &ReferenceData) -> f64 {
    if a == b {
        20.0
    } else if a.polar_opposite() == b {
        100.0
    } else if reference.partition.group(a) != reference.partition.group(b) {
        70.0
    } else {
        40.0
    }
}

/// Complementary pairing of dominant facets.
pub fn symmetry(results: ResultSet<'_>, reference: &ReferenceData) -> f64 {
    results
        .pairs()
        .iter()
        .map(|(a, b)| pair_symmetry(a.dominant_facet(), b.dominant_facet(), reference))
        .sum::<f64>()
        / 3.0
}

/// Five-phase category assigned to an archetype by `id mod 5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Phase {
    const CYCLE: [Phase; 5] = [
        Phase::Wood,
        Phase::Fire,
        Phase::Earth,
        Phase::Metal,
        Phase::Water,
    ];

    pub fn of(id: ArchetypeId) -> Phase {
        Self::CYCLE[usize::from(id.get()) % 5]
    }

    fn position(self) -> usize {
        self as usize
    }

    /// Adjacent in the generating cycle, either direction.
    pub fn generates(self, other: Phase) -> bool {
        let (a, b) = (self.position(), other.position());
        (a + 1) % 5 == b || (b + 1) % 5 == a
    }
}

fn pair_synergy(a: ArchetypeId, b: ArchetypeId) -> f64 {
    let (pa, pb) = (Phase::of(a), Phase::of(b));
    if pa == pb {
        70.0
    } else if pa.generates(pb) {
        100.0
    } else {
        40.0
    }
}

pub fn synergy(results: ResultSet<'_>) -> f64 {
    results
        .pairs()
        .iter()
        .map(|(a, b)| pair_synergy(a.archetype_id, b.archetype_id))
        .sum::<f64>()
        / 3.0
}
