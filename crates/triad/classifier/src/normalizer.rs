use serde::{Deserialize, Serialize};
use triad_types::{FacetEnergyMap, FeatureVector};

use crate::error::ClassifierError;

/// Energy assigned to every facet when no positive signal exists.
pub const UNIFORM_ENERGY: f64 = 100.0 / 8.0;

/// Normalizer output. `degraded` marks the uniform fallback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedEnergies {
    pub energies: FacetEnergyMap,
    pub degraded: bool,
}

impl NormalizedEnergies {
    pub fn uniform() -> Self {
        Self {
            energies: FacetEnergyMap::splat(UNIFORM_ENERGY),
            degraded: true,
        }
    }
}

/// Rescales a raw vector so the strongest facet reads exactly 100.
pub struct FacetEnergyNormalizer;

impl FacetEnergyNormalizer {
    pub fn normalize(raw: &FeatureVector) -> Result<NormalizedEnergies, ClassifierError> {
        if let Some((facet, _)) = raw.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ClassifierError::NonFinite {
                stage: "raw",
                facet,
            });
        }

        let max = raw.max_value();
        if max <= 0.0 {
            return Ok(NormalizedEnergies::uniform());
        }

        let energies = raw.map(|_, v| (v / max * 100.0).clamp(0.0, 100.0));
        Ok(NormalizedEnergies {
            energies,
            degraded: false,
        })
    }
}
