use tracing::{debug, warn};
use triad_types::{
    CategoricalAnswer, ClassifierResult, FacetEnergyMap, FeatureVector, InstanceRole,
    ReferenceData, SelectionMode, TriadError,
};

use crate::error::ClassifierError;
use crate::influence::{CrossInstanceInfluenceAdjuster, InfluenceProfile};
use crate::normalizer::{FacetEnergyNormalizer, NormalizedEnergies};
use crate::resolver::{ArchetypeResolver, Resolution, ResolverConfig};
use crate::vector::FeatureVectorBuilder;

/// Runs one instance's pipeline: vector, normalize, optional influence,
/// resolve.
pub struct InstanceClassifier<'a> {
    reference: &'a ReferenceData,
    resolver: &'a ResolverConfig,
    mode: SelectionMode,
}

impl<'a> InstanceClassifier<'a> {
    pub fn new(reference: &'a ReferenceData, resolver: &'a ResolverConfig, mode: SelectionMode) -> Self {
        Self {
            reference,
            resolver,
            mode,
        }
    }

    /// Core: answers straight through, no influence.
    pub fn classify_core(&self, answers: &[CategoricalAnswer]) -> Result<ClassifierResult, TriadError> {
        let raw = FeatureVectorBuilder::build(answers);
        self.run(InstanceRole::Core, &raw, None)
            .map_err(|e| e.into_triad(InstanceRole::Core))
    }

    /// A derived instance: `raw` is normalized, then biased toward Core.
    pub fn classify_derived(
        &self,
        role: InstanceRole,
        raw: &FeatureVector,
        core: &ClassifierResult,
        profile: &InfluenceProfile,
    ) -> Result<ClassifierResult, TriadError> {
        if !role.is_derived() {
            return Err(TriadError::InvalidInput(format!(
                "{} is not a derived role",
                role
            )));
        }
        self.run(role, raw, Some((core, profile)))
            .map_err(|e| e.into_triad(role))
    }

    fn run(
        &self,
        role: InstanceRole,
        raw: &FeatureVector,
        influence: Option<(&ClassifierResult, &InfluenceProfile)>,
    ) -> Result<ClassifierResult, ClassifierError> {
        let NormalizedEnergies { energies, degraded } = FacetEnergyNormalizer::normalize(raw)?;
        if degraded {
            warn!(role = %role, "No positive signal, using uniform energies");
        }

        let energies: FacetEnergyMap = match influence {
            Some((core, profile)) => {
                CrossInstanceInfluenceAdjuster::new(&self.reference.partition)
                    .adjust(&energies, core, profile)?
            }
            None => energies,
        };

        let resolution = ArchetypeResolver::new(self.reference, self.resolver).resolve(&energies, self.mode)?;
        let fallback = resolution.is_fallback();

        debug!(
            role = %role,
            archetype = resolution.archetype_id.get(),
            upper = %resolution.upper_facet,
            lower = %resolution.lower_facet,
            method = ?resolution.method,
            "Instance resolved"
        );

        let Resolution {
            archetype_id,
            upper_facet,
            lower_facet,
            harmony_score,
            alternatives,
            improvement_hints,
            method,
            legacy_archetype_id,
        } = resolution;

        Ok(ClassifierResult {
            role,
            archetype_id,
            upper_facet,
            lower_facet,
            facet_energy_map: energies,
            harmony_score,
            alternative_candidates: alternatives,
            improvement_hints,
            selection_method: method,
            legacy_archetype_id,
            degraded: degraded || fallback,
        })
    }
}
