use crate::facet::Facet;
use crate::result::InstanceRole;

/// Errors raised by the classification engine.
///
/// Only `InvalidInput` and the two lookup-integrity variants ever escape
/// an analysis run; `InstanceComputation` is absorbed by the orchestrator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TriadError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("lookup integrity violated: {upper}/{lower} maps to {value}, outside 1..=64")]
    LookupIntegrity { upper: Facet, lower: Facet, value: u8 },

    #[error("round-trip mismatch for {role}: table gives {expected} for {upper}/{lower}, result claims {archetype_id}")]
    RoundTripMismatch {
        role: InstanceRole,
        upper: Facet,
        lower: Facet,
        archetype_id: u8,
        expected: u8,
    },

    #[error("{role} computation failed: {reason}")]
    InstanceComputation { role: InstanceRole, reason: String },

    #[error("invalid reference data: {0}")]
    InvalidReference(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl TriadError {
    /// True for errors that signal corrupted reference data and must never
    /// be swallowed.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::LookupIntegrity { .. } | Self::RoundTripMismatch { .. }
        )
    }
}
