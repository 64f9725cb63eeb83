use serde::{Deserialize, Serialize};
use std::fmt;

use crate::archetype::ArchetypeId;
use crate::facet::{Facet, FacetMap, Level};

/// Per-facet raw accumulation for one instance. Transient.
pub type FeatureVector = FacetMap<f64>;

/// Per-facet energies in `[0, 100]`.
pub type FacetEnergyMap = FacetMap<f64>;

/// The three pipeline instances of one analysis session.
///
/// Core reads nothing; Derived1 and Derived2 each read Core's completed
/// result and never each other's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstanceRole {
    Core,
    Derived1,
    Derived2,
}

impl InstanceRole {
    pub const ALL: [InstanceRole; 3] = [Self::Core, Self::Derived1, Self::Derived2];

    /// Conceptual level this role is expected to express.
    pub fn level(self) -> Level {
        match self {
            Self::Core => Level::Celestial,
            Self::Derived1 => Level::Human,
            Self::Derived2 => Level::Terrestrial,
        }
    }

    pub fn is_derived(self) -> bool {
        !matches!(self, Self::Core)
    }
}

impl fmt::Display for InstanceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Derived1 => write!(f, "derived1"),
            Self::Derived2 => write!(f, "derived2"),
        }
    }
}

/// Which selection algorithm the resolver runs first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    HarmonyBalanced,
    Legacy,
}

/// How a result's archetype was actually chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    Harmony,
    Legacy,
    /// Harmony search produced no valid candidate.
    LegacyFallback,
    /// The instance failed and the role default was substituted.
    Defaulted,
}

/// One scored candidate from the harmony search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub archetype_id: ArchetypeId,
    pub upper_facet: Facet,
    pub lower_facet: Facet,
    pub harmony_score: f64,
}

/// Suggestion to raise an underrepresented facet when the winner is close.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImprovementHint {
    pub facet: Facet,
    pub current_energy: f64,
    pub target_energy: f64,
}

/// Durable output of one instance's pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    pub role: InstanceRole,
    pub archetype_id: ArchetypeId,
    pub upper_facet: Facet,
    pub lower_facet: Facet,
    pub facet_energy_map: FacetEnergyMap,
    pub harmony_score: f64,
    pub alternative_candidates: Vec<RankedCandidate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvement_hints: Vec<ImprovementHint>,
    pub selection_method: SelectionMethod,
    /// What plain top-two selection would have produced.
    pub legacy_archetype_id: ArchetypeId,
    pub degraded: bool,
}

impl ClassifierResult {
    /// Highest-energy facet, canonical order on ties. Can differ from
    /// `upper_facet` under harmony selection.
    pub fn dominant_facet(&self) -> Facet {
        self.facet_energy_map.peak()
    }

    pub fn is_defaulted(&self) -> bool {
        self.selection_method == SelectionMethod::Defaulted
    }

    pub fn facets(&self) -> (Facet, Facet) {
        (self.upper_facet, self.lower_facet)
    }

    /// True when harmony and legacy selection disagree.
    pub fn diverges_from_legacy(&self) -> bool {
        self.archetype_id != self.legacy_archetype_id
    }
}
