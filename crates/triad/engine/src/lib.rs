#![deny(unsafe_code)]
//! # triad-engine
//!
//! Session-level orchestration of the three-instance analysis.
//!
//! [`MultiInstanceOrchestrator::analyze`] runs Core first, then Derived1
//! and Derived2 against Core's completed result, validates every result
//! against the combination table and evaluates the triple. Results are
//! memoized in an [`AnalysisCache`] keyed by a BLAKE3 digest of the input,
//! config and reference data.

pub mod analysis;
pub mod cache;
pub mod config;
pub mod defaults;
pub mod interpretation;
pub mod orchestrator;

pub use analysis::{RoleReading, TripleAnalysis};
pub use cache::{AnalysisCache, CacheStats, InputDigest};
pub use config::EngineConfig;
pub use defaults::{default_pair, role_default};
pub use interpretation::{InterpretationRecord, InterpretationRegistry};
pub use orchestrator::MultiInstanceOrchestrator;
