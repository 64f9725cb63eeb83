#![deny(unsafe_code)]
//! # triad-types
//!
//! Shared vocabulary of the triad classification engine.
//!
//! - [`Facet`] and the enum-indexed [`FacetMap`]: the 8-dimensional feature space
//! - [`CategoricalAnswer`] / [`AnalysisInput`]: what a session supplies
//! - [`ReferenceData`]: the injected combination table, compatibility
//!   matrix, stability weights, facet partition and archetype catalog
//! - [`ClassifierResult`]: the per-instance output
//! - [`TriadError`]: the error taxonomy shared by every crate

pub mod answer;
pub mod archetype;
pub mod error;
pub mod facet;
pub mod reference;
pub mod result;

pub use answer::{AnalysisInput, CategoricalAnswer};
pub use archetype::{ArchetypeCatalog, ArchetypeId, ArchetypeRecord};
pub use error::TriadError;
pub use facet::{Facet, FacetMap, Level};
pub use reference::{
    CombinationTable, CompatibilityMatrix, FacetGroup, FacetPartition, PartitionSpec,
    ReferenceData, StabilityWeights,
};
pub use result::{
    ClassifierResult, FacetEnergyMap, FeatureVector, ImprovementHint, InstanceRole,
    RankedCandidate, SelectionMethod, SelectionMode,
};
