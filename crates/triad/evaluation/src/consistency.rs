use triad_types::{ClassifierResult, ReferenceData};

use crate::config::ConsistencyWeights;
use crate::types::{ConsistencyBreakdown, ResultSet};

/// Points lost per unit of mean pairwise id distance.
const DISTANCE_PENALTY: f64 = 1.5;

pub fn score(
    results: ResultSet<'_>,
    reference: &ReferenceData,
    weights: &ConsistencyWeights,
) -> ConsistencyBreakdown {
    let distance = distance_score(results);
    let facet_compatibility = facet_compatibility(results, reference);
    let alignment = alignment(results, reference);
    let score = (weights.distance * distance
        + weights.facet_compatibility * facet_compatibility
        + weights.alignment * alignment)
        .clamp(0.0, 100.0);

    ConsistencyBreakdown {
        distance,
        facet_compatibility,
        alignment,
        score,
    }
}

/// Inverted mean pairwise id distance.
pub fn distance_score(results: ResultSet<'_>) -> f64 {
    let mean = results
        .pairs()
        .iter()
        .map(|(a, b)| f64::from(a.archetype_id.distance(b.archetype_id)))
        .sum::<f64>()
        / 3.0;
    (100.0 - mean * DISTANCE_PENALTY).max(0.0)
}

/// Mean pairwise compatibility of dominant facets, scaled to 100.
pub fn facet_compatibility(results: ResultSet<'_>, reference: &ReferenceData) -> f64 {
    results
        .pairs()
        .iter()
        .map(|(a, b)| {
            reference
                .compatibility
                .get(a.dominant_facet(), b.dominant_facet())
        })
        .sum::<f64>()
        / 3.0
        * 100.0
}

/// How well each result's dominant facet matches its archetype's own
/// canonical facet pair.
pub fn alignment(results: ResultSet<'_>, reference: &ReferenceData) -> f64 {
    results
        .all()
        .iter()
        .map(|r| single_alignment(r, reference))
        .sum::<f64>()
        / 3.0
}

fn single_alignment(result: &ClassifierResult, reference: &ReferenceData) -> f64 {
    let (upper, lower) = reference
        .combination
        .pair_for(result.archetype_id)
        .unwrap_or_else(|| result.facets());
    let dominant = result.dominant_facet();
    if dominant == upper {
        100.0
    } else if dominant == lower {
        75.0
    } else {
        50.0 * reference.compatibility.get(dominant, upper)
    }
}
