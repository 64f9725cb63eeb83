#![deny(unsafe_code)]
//! # triad-evaluation
//!
//! Cross-instance evaluation of a completed Core / Derived1 / Derived2 triple.
//!
//! - [`ResultValidator`]: round-trip integrity of every result, duplicate detection
//! - [`ConsistencyBalanceEvaluator`]: consistency, balance and integration
//!   scores, threshold-gated recommendations and the overall [`AnalysisStatus`]

pub mod balance;
pub mod config;
pub mod consistency;
pub mod evaluator;
pub mod integration;
pub mod recommendations;
pub mod types;
pub mod validator;

pub use config::{
    BalanceWeights, ConsistencyWeights, EvaluationConfig, IntegrationWeights, Thresholds,
};
pub use evaluator::ConsistencyBalanceEvaluator;
pub use integration::Phase;
pub use types::{
    AnalysisStatus, BalanceBreakdown, ConsistencyBreakdown, DuplicateReport, InstanceCheck,
    IntegrationBreakdown, InteractionReport, Priority, Recommendation, RecommendationKind,
    ResultSet, ValidationReport,
};
pub use validator::{detect_duplicates, ResultValidator};
