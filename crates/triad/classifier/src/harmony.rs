//! Harmony score of a candidate facet pair against a full energy map.

use serde::{Deserialize, Serialize};
use triad_types::{CompatibilityMatrix, Facet, FacetEnergyMap};

/// Blend weights of the three harmony terms. Expected to sum to 1.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HarmonyWeights {
    pub concentration: f64,
    pub utilization: f64,
    pub compatibility: f64,
}

impl Default for HarmonyWeights {
    fn default() -> Self {
        Self {
            concentration: 0.5,
            utilization: 0.2,
            compatibility: 0.3,
        }
    }
}

impl HarmonyWeights {
    pub fn sum(&self) -> f64 {
        self.concentration + self.utilization + self.compatibility
    }
}

/// Penalty applied when the lower facet outweighs the upper one.
const INVERTED_PAIR_FACTOR: f64 = 0.9;

/// Scores resolved to this precision so equal candidates tie exactly.
const SCORE_QUANTUM: f64 = 1e-6;

pub struct HarmonyScorer<'a> {
    compatibility: &'a CompatibilityMatrix,
    weights: &'a HarmonyWeights,
}

impl<'a> HarmonyScorer<'a> {
    pub fn new(compatibility: &'a CompatibilityMatrix, weights: &'a HarmonyWeights) -> Self {
        Self {
            compatibility,
            weights,
        }
    }

    /// Score `(upper, lower)` in `[0, 100]`. `total` is the map's energy
    /// sum and must be positive.
    pub fn score(&self, energies: &FacetEnergyMap, upper: Facet, lower: Facet, total: f64) -> f64 {
        let mass = pair_mass(energies, upper, lower);
        let share = mass / total;

        let mut concentration = share;
        if energies[upper] < energies[lower] {
            concentration *= INVERTED_PAIR_FACTOR;
        }

        let raw = 100.0
            * (self.weights.concentration * concentration
                + self.weights.utilization * utilization(share)
                + self.weights.compatibility * self.compatibility.get(upper, lower));
        quantize(raw.clamp(0.0, 100.0))
    }
}

/// Energy held by the pair; a doubled facet counts once.
pub fn pair_mass(energies: &FacetEnergyMap, upper: Facet, lower: Facet) -> f64 {
    if upper == lower {
        energies[upper]
    } else {
        energies[upper] + energies[lower]
    }
}

/// Rewards pairs that leave a meaningful share to the secondary facets.
pub fn utilization(share: f64) -> f64 {
    if (0.3..=0.7).contains(&share) {
        1.0
    } else if (0.2..=0.8).contains(&share) {
        0.8
    } else if (0.15..=0.85).contains(&share) {
        0.6
    } else {
        0.4
    }
}

fn quantize(value: f64) -> f64 {
    (value / SCORE_QUANTUM).round() * SCORE_QUANTUM
}
