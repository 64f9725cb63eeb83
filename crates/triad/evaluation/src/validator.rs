use std::collections::BTreeMap;
use tracing::{debug, warn};
use triad_types::{ArchetypeId, ClassifierResult, CombinationTable, TriadError};

use crate::types::{DuplicateReport, InstanceCheck, ResultSet, ValidationReport};

/// Checks every result against the combination table and flags
/// cross-instance duplicates.
pub struct ResultValidator<'a> {
    table: &'a CombinationTable,
}

impl<'a> ResultValidator<'a> {
    pub fn new(table: &'a CombinationTable) -> Self {
        Self { table }
    }

    /// Round-trip check for one result. A mismatch is an integrity error,
    /// never a soft failure.
    pub fn check(&self, result: &ClassifierResult) -> Result<InstanceCheck, TriadError> {
        let expected = self.table.lookup(result.upper_facet, result.lower_facet)?;
        if expected != result.archetype_id {
            return Err(TriadError::RoundTripMismatch {
                role: result.role,
                upper: result.upper_facet,
                lower: result.lower_facet,
                archetype_id: result.archetype_id.get(),
                expected: expected.get(),
            });
        }

        let energies_valid = result
            .facet_energy_map
            .values()
            .all(|v| v.is_finite() && (0.0..=100.0).contains(v));
        if !energies_valid {
            warn!(role = %result.role, "Result carries energies outside [0, 100]");
        }

        Ok(InstanceCheck {
            role: result.role,
            archetype_id: result.archetype_id,
            energies_valid,
        })
    }

    pub fn validate(&self, results: ResultSet<'_>) -> Result<ValidationReport, TriadError> {
        let checks = results
            .all()
            .iter()
            .map(|r| self.check(r))
            .collect::<Result<Vec<_>, _>>()?;

        let duplicates = detect_duplicates(&results.all());
        if duplicates.has_duplicates {
            warn!(ids = ?duplicates.duplicate_ids, "Instances share an archetype");
        }

        let degraded_roles = results
            .all()
            .iter()
            .filter(|r| r.degraded)
            .map(|r| r.role)
            .collect();
        let defaulted_roles = results
            .all()
            .iter()
            .filter(|r| r.is_defaulted())
            .map(|r| r.role)
            .collect();

        let report = ValidationReport {
            checks,
            duplicates,
            degraded_roles,
            defaulted_roles,
        };
        debug!(
            unique = report.duplicates.unique_count,
            clean = report.is_clean(),
            "Validation complete"
        );
        Ok(report)
    }
}

/// Duplicates are reported, never fatal.
pub fn detect_duplicates(results: &[&ClassifierResult]) -> DuplicateReport {
    let mut counts: BTreeMap<ArchetypeId, usize> = BTreeMap::new();
    for r in results {
        *counts.entry(r.archetype_id).or_insert(0) += 1;
    }
    let duplicate_ids: Vec<ArchetypeId> = counts
        .iter()
        .filter(|(_, n)| **n > 1)
        .map(|(id, _)| *id)
        .collect();
    DuplicateReport {
        has_duplicates: !duplicate_ids.is_empty(),
        duplicate_ids,
        unique_count: counts.len(),
    }
}
