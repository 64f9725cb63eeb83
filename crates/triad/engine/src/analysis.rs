use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triad_classifier::StressProfile;
use triad_evaluation::{AnalysisStatus, InteractionReport, ResultSet, ValidationReport};
use triad_types::{ArchetypeId, ClassifierResult, InstanceRole};

use crate::cache::InputDigest;

/// Interpretation text attached to one role's archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleReading {
    pub role: InstanceRole,
    pub archetype_id: ArchetypeId,
    pub name: String,
    pub reading: String,
}

/// Complete output of one analysis session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripleAnalysis {
    /// Cache key: input, config and reference data hashed together.
    pub input_digest: InputDigest,
    pub core: ClassifierResult,
    pub derived1: ClassifierResult,
    pub derived2: ClassifierResult,
    pub stress_profile: StressProfile,
    pub validation: ValidationReport,
    pub interaction: InteractionReport,
    pub readings: Vec<RoleReading>,
    pub status: AnalysisStatus,
    /// When the analysis was first computed; cache hits return this timestamp unchanged.
    pub analyzed_at: DateTime<Utc>,
}

impl TripleAnalysis {
    pub fn result(&self, role: InstanceRole) -> &ClassifierResult {
        match role {
            InstanceRole::Core => &self.core,
            InstanceRole::Derived1 => &self.derived1,
            InstanceRole::Derived2 => &self.derived2,
        }
    }

    pub fn results(&self) -> ResultSet<'_> {
        ResultSet::new(&self.core, &self.derived1, &self.derived2)
    }

    pub fn is_degraded(&self) -> bool {
        self.results().all().iter().any(|r| r.degraded)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
