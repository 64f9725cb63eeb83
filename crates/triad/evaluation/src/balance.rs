use std::collections::BTreeSet;
use triad_types::{ClassifierResult, Facet, ReferenceData};

use crate::config::BalanceWeights;
use crate::types::{BalanceBreakdown, ResultSet};

pub fn score(
    results: ResultSet<'_>,
    reference: &ReferenceData,
    weights: &BalanceWeights,
    ideal_shares: &[f64; 3],
) -> BalanceBreakdown {
    let distribution = distribution(results, ideal_shares);
    let complementarity = complementarity(results);
    let stability = stability(results, reference);
    let adaptability = adaptability(results);
    let score = (weights.distribution * distribution
        + weights.complementarity * complementarity
        + weights.stability * stability
        + weights.adaptability * adaptability)
        .clamp(0.0, 100.0);

    BalanceBreakdown {
        distribution,
        complementarity,
        stability,
        adaptability,
        score,
    }
}

/// Mean energy lifted by the spread between strongest and weakest facet.
pub fn instance_intensity(result: &ClassifierResult) -> f64 {
    let e = &result.facet_energy_map;
    (e.mean() + 0.3 * (e.max_value() - e.min_value())).clamp(0.0, 100.0)
}

/// Closeness of each instance's share of aggregate intensity to its ideal.
pub fn distribution(results: ResultSet<'_>, ideal_shares: &[f64; 3]) -> f64 {
    let intensities = results.all().map(instance_intensity);
    let total: f64 = intensities.iter().sum();
    let shares = if total > 0.0 {
        intensities.map(|i| i / total)
    } else {
        [1.0 / 3.0; 3]
    };
    let deviation: f64 = ideal_shares
        .iter()
        .zip(shares.iter())
        .map(|(ideal, share)| (ideal - share).abs())
        .sum();
    (100.0 - 100.0 * deviation).max(0.0)
}

fn facet_set(result: &ClassifierResult) -> BTreeSet<Facet> {
    [result.upper_facet, result.lower_facet].into_iter().collect()
}

/// Mean pairwise Jaccard distance of the `{upper, lower}` sets.
pub fn complementarity(results: ResultSet<'_>) -> f64 {
    results
        .pairs()
        .iter()
        .map(|(a, b)| {
            let (sa, sb) = (facet_set(a), facet_set(b));
            let shared = sa.intersection(&sb).count() as f64;
            let union = sa.union(&sb).count() as f64;
            1.0 - shared / union
        })
        .sum::<f64>()
        / 3.0
        * 100.0
}

pub fn stability(results: ResultSet<'_>, reference: &ReferenceData) -> f64 {
    results
        .all()
        .iter()
        .map(|r| (reference.stability.get(r.upper_facet) + reference.stability.get(r.lower_facet)) / 2.0)
        .sum::<f64>()
        / 3.0
}

/// Distinct facets across all three pairs, out of eight.
pub fn adaptability(results: ResultSet<'_>) -> f64 {
    let distinct: BTreeSet<Facet> = results
        .all()
        .iter()
        .flat_map(|r| [r.upper_facet, r.lower_facet])
        .collect();
    distinct.len() as f64 / Facet::COUNT as f64 * 100.0
}
