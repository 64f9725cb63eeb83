use tracing::info;
use triad_types::ReferenceData;

use crate::config::EvaluationConfig;
use crate::types::{AnalysisStatus, InteractionReport, ResultSet, ValidationReport};
use crate::{balance, consistency, integration, recommendations};

/// Scores a completed triple and decides its status.
pub struct ConsistencyBalanceEvaluator<'a> {
    reference: &'a ReferenceData,
    config: &'a EvaluationConfig,
}

impl<'a> ConsistencyBalanceEvaluator<'a> {
    pub fn new(reference: &'a ReferenceData, config: &'a EvaluationConfig) -> Self {
        Self { reference, config }
    }

    pub fn evaluate(&self, results: ResultSet<'_>, validation: &ValidationReport) -> InteractionReport {
        let consistency_breakdown =
            consistency::score(results, self.reference, &self.config.consistency_weights);
        let balance_breakdown = balance::score(
            results,
            self.reference,
            &self.config.balance_weights,
            &self.config.ideal_shares,
        );
        let integration_breakdown =
            integration::score(results, self.reference, &self.config.integration_weights);

        let (c, b, i) = (
            consistency_breakdown.score,
            balance_breakdown.score,
            integration_breakdown.score,
        );
        let recommendations =
            recommendations::recommend(c, b, i, &self.config.thresholds, validation);
        let status = self.status(c, b, i, validation);

        info!(
            consistency = c,
            balance = b,
            integration = i,
            status = %status,
            "Interaction evaluated"
        );

        InteractionReport {
            consistency: c,
            balance: b,
            integration: i,
            consistency_breakdown,
            balance_breakdown,
            integration_breakdown,
            recommendations,
            status,
        }
    }

    /// Excellent needs a clean triple and every threshold met; Good a clean
    /// triple and mean >= 60; Acceptable no defaults and mean >= 50.
    pub fn status(
        &self,
        consistency: f64,
        balance: f64,
        integration: f64,
        validation: &ValidationReport,
    ) -> AnalysisStatus {
        let t = &self.config.thresholds;
        let mean = (consistency + balance + integration) / 3.0;
        let clean = validation.all_passed() && validation.is_clean();
        let thresholds_met =
            consistency >= t.consistency && balance >= t.balance && integration >= t.integration;

        if clean && thresholds_met {
            AnalysisStatus::Excellent
        } else if clean && mean >= 60.0 {
            AnalysisStatus::Good
        } else if validation.defaulted_roles.is_empty() && mean >= 50.0 {
            AnalysisStatus::Acceptable
        } else {
            AnalysisStatus::NeedsImprovement
        }
    }
}
