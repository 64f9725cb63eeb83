use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use triad_types::{
    ArchetypeId, Facet, FacetEnergyMap, ImprovementHint, RankedCandidate, ReferenceData,
    SelectionMethod, SelectionMode, TriadError,
};

use crate::error::ClassifierError;
use crate::harmony::{HarmonyScorer, HarmonyWeights};

/// Tuning for the harmony-balanced search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub harmony_weights: HarmonyWeights,
    /// Alternatives reported next to the winner. At least 3.
    pub alternative_count: usize,
    /// Winner/runner-up gap (harmony points) below which hints are emitted.
    pub improvement_margin: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            harmony_weights: HarmonyWeights::default(),
            alternative_count: 3,
            improvement_margin: 5.0,
        }
    }
}

impl ResolverConfig {
    pub const MIN_ALTERNATIVES: usize = 3;

    pub fn validate(&self) -> Result<(), TriadError> {
        let w = &self.harmony_weights;
        let terms = [w.concentration, w.utilization, w.compatibility];
        if terms.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(TriadError::InvalidConfig(
                "harmony weights must be finite and non-negative".into(),
            ));
        }
        if (w.sum() - 1.0).abs() > 1e-6 {
            return Err(TriadError::InvalidConfig(format!(
                "harmony weights sum to {}, expected 1",
                w.sum()
            )));
        }
        if self.alternative_count < Self::MIN_ALTERNATIVES {
            return Err(TriadError::InvalidConfig(format!(
                "alternative_count {} below minimum {}",
                self.alternative_count,
                Self::MIN_ALTERNATIVES
            )));
        }
        if !self.improvement_margin.is_finite() || self.improvement_margin < 0.0 {
            return Err(TriadError::InvalidConfig(
                "improvement_margin must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// The resolver's choice for one energy map.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub archetype_id: ArchetypeId,
    pub upper_facet: Facet,
    pub lower_facet: Facet,
    pub harmony_score: f64,
    pub alternatives: Vec<RankedCandidate>,
    pub improvement_hints: Vec<ImprovementHint>,
    pub method: SelectionMethod,
    pub legacy_archetype_id: ArchetypeId,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        self.method == SelectionMethod::LegacyFallback
    }
}

/// Picks an ordered facet pair and resolves it through the combination table.
pub struct ArchetypeResolver<'a> {
    reference: &'a ReferenceData,
    config: &'a ResolverConfig,
}

impl<'a> ArchetypeResolver<'a> {
    pub fn new(reference: &'a ReferenceData, config: &'a ResolverConfig) -> Self {
        Self { reference, config }
    }

    /// Resolve with the requested mode. Harmony mode falls back to legacy
    /// when no valid candidate exists; only table corruption is an error.
    pub fn resolve(
        &self,
        energies: &FacetEnergyMap,
        mode: SelectionMode,
    ) -> Result<Resolution, ClassifierError> {
        let (upper, lower) = legacy_pair(energies);
        let legacy_id = self.reference.combination.lookup(upper, lower)?;

        if mode == SelectionMode::Legacy {
            return Ok(self.legacy_resolution(energies, legacy_id, SelectionMethod::Legacy));
        }

        match self.resolve_harmony(energies, legacy_id)? {
            Some(resolution) => Ok(resolution),
            None => {
                warn!(
                    legacy_archetype = legacy_id.get(),
                    "No valid harmony candidate, falling back to legacy selection"
                );
                Ok(self.legacy_resolution(energies, legacy_id, SelectionMethod::LegacyFallback))
            }
        }
    }

    /// Top-two selection only.
    pub fn resolve_legacy(&self, energies: &FacetEnergyMap) -> Result<Resolution, ClassifierError> {
        self.resolve(energies, SelectionMode::Legacy)
    }

    /// Every ordered pair scored and ranked: score descending, then id
    /// ascending, then pair order. Empty when the map carries no usable mass.
    pub fn rank_candidates(
        &self,
        energies: &FacetEnergyMap,
    ) -> Result<Vec<RankedCandidate>, ClassifierError> {
        let total = energies.sum();
        if !energies.all_finite() || !total.is_finite() || total <= 0.0 {
            return Ok(Vec::new());
        }

        let scorer = HarmonyScorer::new(&self.reference.compatibility, &self.config.harmony_weights);
        let mut candidates = Vec::with_capacity(Facet::COUNT * Facet::COUNT);
        for (upper, lower, _) in self.reference.combination.pairs() {
            let archetype_id = self.reference.combination.lookup(upper, lower)?;
            let harmony_score = scorer.score(energies, upper, lower, total);
            if !harmony_score.is_finite() {
                continue;
            }
            candidates.push(RankedCandidate {
                archetype_id,
                upper_facet: upper,
                lower_facet: lower,
                harmony_score,
            });
        }

        // stable sort keeps upper-major pair order as the last key
        candidates.sort_by(|a, b| {
            b.harmony_score
                .total_cmp(&a.harmony_score)
                .then(a.archetype_id.cmp(&b.archetype_id))
        });
        Ok(candidates)
    }

    fn resolve_harmony(
        &self,
        energies: &FacetEnergyMap,
        legacy_id: ArchetypeId,
    ) -> Result<Option<Resolution>, ClassifierError> {
        let ranked = self.rank_candidates(energies)?;
        let Some(winner) = ranked.first().cloned() else {
            return Ok(None);
        };

        let mut seen = vec![winner.archetype_id];
        let mut alternatives = Vec::with_capacity(self.config.alternative_count);
        for candidate in ranked.iter().skip(1) {
            if alternatives.len() == self.config.alternative_count {
                break;
            }
            if seen.contains(&candidate.archetype_id) {
                continue;
            }
            seen.push(candidate.archetype_id);
            alternatives.push(candidate.clone());
        }

        let margin = alternatives
            .first()
            .map(|runner_up| winner.harmony_score - runner_up.harmony_score)
            .unwrap_or(f64::INFINITY);
        let improvement_hints = if margin < self.config.improvement_margin {
            improvement_hints(energies)
        } else {
            Vec::new()
        };

        debug!(
            archetype = winner.archetype_id.get(),
            score = winner.harmony_score,
            margin,
            legacy_archetype = legacy_id.get(),
            "Harmony selection complete"
        );

        Ok(Some(Resolution {
            archetype_id: winner.archetype_id,
            upper_facet: winner.upper_facet,
            lower_facet: winner.lower_facet,
            harmony_score: winner.harmony_score,
            alternatives,
            improvement_hints,
            method: SelectionMethod::Harmony,
            legacy_archetype_id: legacy_id,
        }))
    }

    fn legacy_resolution(
        &self,
        energies: &FacetEnergyMap,
        legacy_id: ArchetypeId,
        method: SelectionMethod,
    ) -> Resolution {
        let (upper, lower) = legacy_pair(energies);
        let total = energies.sum();
        let harmony_score = if energies.all_finite() && total.is_finite() && total > 0.0 {
            HarmonyScorer::new(&self.reference.compatibility, &self.config.harmony_weights)
                .score(energies, upper, lower, total)
        } else {
            0.0
        };
        Resolution {
            archetype_id: legacy_id,
            upper_facet: upper,
            lower_facet: lower,
            harmony_score,
            alternatives: Vec::new(),
            improvement_hints: Vec::new(),
            method,
            legacy_archetype_id: legacy_id,
        }
    }
}

/// The two highest-energy facets, canonical order on ties.
pub fn legacy_pair(energies: &FacetEnergyMap) -> (Facet, Facet) {
    let ranked = energies.ranked();
    (ranked[0], ranked[1])
}

/// The most underrepresented facet, plus any facet below half the mean.
pub fn improvement_hints(energies: &FacetEnergyMap) -> Vec<ImprovementHint> {
    let mean = energies.mean();
    let trough = energies.trough();
    let mut hints = Vec::new();
    if energies[trough] < mean {
        hints.push(ImprovementHint {
            facet: trough,
            current_energy: energies[trough],
            target_energy: mean,
        });
    }
    for (facet, value) in energies.iter() {
        if facet != trough && *value < mean * 0.5 {
            hints.push(ImprovementHint {
                facet,
                current_energy: *value,
                target_energy: mean * 0.7,
            });
        }
    }
    hints
}
