use triad_types::{Facet, InstanceRole, TriadError};

/// Failures inside a single pipeline stage.
///
/// Carries no role; [`ClassifierError::into_triad`] attaches one at the
/// instance boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("non-finite {stage} value for {facet}")]
    NonFinite { stage: &'static str, facet: Facet },

    #[error("answer {question_id} carries a non-finite facet weight")]
    NonFiniteWeight { question_id: String },

    #[error(transparent)]
    Reference(#[from] TriadError),
}

impl ClassifierError {
    /// Lift into the shared taxonomy. Integrity errors keep their variant so
    /// they are never mistaken for a recoverable instance failure.
    pub fn into_triad(self, role: InstanceRole) -> TriadError {
        match self {
            Self::Reference(e) if e.is_integrity_violation() => e,
            other => TriadError::InstanceComputation {
                role,
                reason: other.to_string(),
            },
        }
    }
}
