#![deny(unsafe_code)]
//! # triad-classifier
//!
//! Single-instance classification pipeline:
//!
//! 1. [`FeatureVectorBuilder`] sums answer facet weights
//! 2. [`FacetEnergyNormalizer`] rescales to `[0, 100]` energies
//! 3. [`CrossInstanceInfluenceAdjuster`] biases a derived instance toward Core
//! 4. [`ArchetypeResolver`] picks a facet pair (harmony or legacy) and
//!    resolves it through the combination table
//!
//! [`StressPatternExtractor`] builds the Derived2 raw vector from scenario
//! answers. [`InstanceClassifier`] wires the stages for one role.

pub mod classify;
pub mod error;
pub mod harmony;
pub mod influence;
pub mod normalizer;
pub mod resolver;
pub mod stress;
pub mod vector;

pub use classify::InstanceClassifier;
pub use error::ClassifierError;
pub use harmony::{HarmonyScorer, HarmonyWeights};
pub use influence::{CrossInstanceInfluenceAdjuster, GroupAmplification, InfluenceProfile};
pub use normalizer::{FacetEnergyNormalizer, NormalizedEnergies, UNIFORM_ENERGY};
pub use resolver::{ArchetypeResolver, Resolution, ResolverConfig};
pub use stress::{
    DefensivePattern, StressLexicon, StressPatternExtractor, StressProfile, StressResponse,
};
pub use vector::FeatureVectorBuilder;
