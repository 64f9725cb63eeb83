use serde::{Deserialize, Serialize};
use std::fmt;
use triad_types::{ArchetypeId, ClassifierResult, InstanceRole};

/// Borrowed view over the three results of one session.
#[derive(Clone, Copy, Debug)]
pub struct ResultSet<'a> {
    pub core: &'a ClassifierResult,
    pub derived1: &'a ClassifierResult,
    pub derived2: &'a ClassifierResult,
}

impl<'a> ResultSet<'a> {
    pub fn new(
        core: &'a ClassifierResult,
        derived1: &'a ClassifierResult,
        derived2: &'a ClassifierResult,
    ) -> Self {
        Self {
            core,
            derived1,
            derived2,
        }
    }

    pub fn all(&self) -> [&'a ClassifierResult; 3] {
        [self.core, self.derived1, self.derived2]
    }

    /// The three unordered pairs: (core, d1), (core, d2), (d1, d2).
    pub fn pairs(&self) -> [(&'a ClassifierResult, &'a ClassifierResult); 3] {
        [
            (self.core, self.derived1),
            (self.core, self.derived2),
            (self.derived1, self.derived2),
        ]
    }
}

/// Outcome of checking one result. Only results that round-trip through
/// the combination table get a check; a mismatch is an error instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstanceCheck {
    pub role: InstanceRole,
    pub archetype_id: ArchetypeId,
    /// Every facet energy is finite and within `[0, 100]`.
    pub energies_valid: bool,
}

impl InstanceCheck {
    pub fn passed(&self) -> bool {
        self.energies_valid
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub has_duplicates: bool,
    /// Ids reached by more than one instance, ascending.
    pub duplicate_ids: Vec<ArchetypeId>,
    pub unique_count: usize,
}

/// Aggregate validation consumed by the status decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub checks: Vec<InstanceCheck>,
    pub duplicates: DuplicateReport,
    pub degraded_roles: Vec<InstanceRole>,
    pub defaulted_roles: Vec<InstanceRole>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(InstanceCheck::passed)
    }

    pub fn is_clean(&self) -> bool {
        !self.duplicates.has_duplicates
            && self.degraded_roles.is_empty()
            && self.defaulted_roles.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyBreakdown {
    pub distance: f64,
    pub facet_compatibility: f64,
    pub alignment: f64,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    pub distribution: f64,
    pub complementarity: f64,
    pub stability: f64,
    pub adaptability: f64,
    pub score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntegrationBreakdown {
    pub meaning: f64,
    pub levels: f64,
    pub symmetry: f64,
    pub synergy: f64,
    pub score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Alignment,
    Rebalance,
    DeeperReview,
    CompleteInput,
    ContinueMonitoring,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Excellent,
    Good,
    Acceptable,
    NeedsImprovement,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Acceptable => write!(f, "acceptable"),
            Self::NeedsImprovement => write!(f, "needs_improvement"),
        }
    }
}

/// Cross-instance scores, recommendations and overall status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InteractionReport {
    pub consistency: f64,
    pub balance: f64,
    pub integration: f64,
    pub consistency_breakdown: ConsistencyBreakdown,
    pub balance_breakdown: BalanceBreakdown,
    pub integration_breakdown: IntegrationBreakdown,
    pub recommendations: Vec<Recommendation>,
    pub status: AnalysisStatus,
}

impl InteractionReport {
    pub fn mean_score(&self) -> f64 {
        (self.consistency + self.balance + self.integration) / 3.0
    }
}
