use serde::{Deserialize, Serialize};
use tracing::debug;
use triad_types::{
    ClassifierResult, Facet, FacetEnergyMap, FacetGroup, FacetMap, FacetPartition, TriadError,
};

use crate::error::ClassifierError;

/// Per-facet coefficients for the Derived1 group step. Only expressive
/// facets are read; reserved entries are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupAmplification {
    /// Applied as `1 - ratio * k` when Core's dominant facet is reserved.
    pub dampen: FacetMap<f64>,
    /// Applied as `1 + ratio * k` when Core's dominant facet is expressive.
    pub amplify: FacetMap<f64>,
}

impl Default for GroupAmplification {
    fn default() -> Self {
        let mut dampen = FacetMap::zeros();
        dampen[Facet::Heaven] = 0.8;
        dampen[Facet::Lake] = 0.4;
        dampen[Facet::Fire] = 0.6;
        dampen[Facet::Thunder] = 0.7;

        let mut amplify = FacetMap::zeros();
        amplify[Facet::Heaven] = 0.6;
        amplify[Facet::Lake] = 0.7;
        amplify[Facet::Fire] = 0.5;
        amplify[Facet::Thunder] = 0.5;

        Self { dampen, amplify }
    }
}

/// How strongly Core biases one derived instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfluenceProfile {
    /// Share of Core's energy blended in, in `[0, 1]`.
    pub ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_amplification: Option<GroupAmplification>,
}

impl InfluenceProfile {
    pub fn derived1() -> Self {
        Self {
            ratio: 0.25,
            group_amplification: Some(GroupAmplification::default()),
        }
    }

    pub fn derived2() -> Self {
        Self {
            ratio: 0.40,
            group_amplification: None,
        }
    }

    pub fn validate(&self) -> Result<(), TriadError> {
        if !(0.0..=1.0).contains(&self.ratio) {
            return Err(TriadError::InvalidConfig(format!(
                "influence ratio {} outside [0, 1]",
                self.ratio
            )));
        }
        if let Some(group) = &self.group_amplification {
            let mut coefficients = group.dampen.values().chain(group.amplify.values());
            if coefficients.any(|k| !(0.0..=1.0).contains(k)) {
                return Err(TriadError::InvalidConfig(
                    "amplification coefficients must lie in [0, 1]".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Blends a derived instance's energies toward Core's resolved energies.
pub struct CrossInstanceInfluenceAdjuster<'a> {
    partition: &'a FacetPartition,
}

impl<'a> CrossInstanceInfluenceAdjuster<'a> {
    pub fn new(partition: &'a FacetPartition) -> Self {
        Self { partition }
    }

    /// `raw * (1 - r) + core * r`, then the optional group step on
    /// expressive facets, then clamped to `[0, 100]`.
    pub fn adjust(
        &self,
        raw: &FacetEnergyMap,
        core: &ClassifierResult,
        profile: &InfluenceProfile,
    ) -> Result<FacetEnergyMap, ClassifierError> {
        let ratio = profile.ratio;
        let core_energies = &core.facet_energy_map;

        let mut adjusted = raw.map(|facet, v| v * (1.0 - ratio) + core_energies[facet] * ratio);

        if let Some(group) = &profile.group_amplification {
            let driver = core.dominant_facet();
            let driver_group = self.partition.group(driver);
            for facet in self.partition.members(FacetGroup::Expressive) {
                let factor = match driver_group {
                    FacetGroup::Reserved => 1.0 - ratio * group.dampen[facet],
                    FacetGroup::Expressive => 1.0 + ratio * group.amplify[facet],
                };
                adjusted[facet] *= factor;
            }
            debug!(driver = %driver, group = ?driver_group, "Group amplification applied");
        }

        for (facet, value) in adjusted.iter() {
            if !value.is_finite() {
                return Err(ClassifierError::NonFinite {
                    stage: "influence",
                    facet,
                });
            }
        }
        Ok(adjusted.map(|_, v| v.clamp(0.0, 100.0)))
    }
}
