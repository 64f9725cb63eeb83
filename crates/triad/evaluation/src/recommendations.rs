use crate::config::Thresholds;
use crate::types::{Priority, Recommendation, RecommendationKind, ValidationReport};

/// Threshold-gated suggestions. Falls back to a single low-priority
/// "continue monitoring" entry when nothing fires.
pub fn recommend(
    consistency: f64,
    balance: f64,
    integration: f64,
    thresholds: &Thresholds,
    validation: &ValidationReport,
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    if consistency < thresholds.consistency {
        out.push(Recommendation {
            kind: RecommendationKind::Alignment,
            priority: Priority::High,
            message: format!(
                "Consistency {:.1} is below {:.1}: re-examine how the three instances align",
                consistency, thresholds.consistency
            ),
        });
    }

    if balance < thresholds.balance {
        out.push(Recommendation {
            kind: RecommendationKind::Rebalance,
            priority: Priority::Medium,
            message: format!(
                "Balance {:.1} is below {:.1}: rebalance energy across instances",
                balance, thresholds.balance
            ),
        });
    }

    if integration < thresholds.integration {
        out.push(Recommendation {
            kind: RecommendationKind::DeeperReview,
            priority: Priority::Medium,
            message: format!(
                "Integration {:.1} is below {:.1}: review how the archetypes combine",
                integration, thresholds.integration
            ),
        });
    }

    if !validation.degraded_roles.is_empty() {
        let roles: Vec<String> = validation.degraded_roles.iter().map(|r| r.to_string()).collect();
        out.push(Recommendation {
            kind: RecommendationKind::CompleteInput,
            priority: Priority::High,
            message: format!(
                "Degraded results for {}: re-run with more complete input",
                roles.join(", ")
            ),
        });
    }

    if out.is_empty() {
        out.push(Recommendation {
            kind: RecommendationKind::ContinueMonitoring,
            priority: Priority::Low,
            message: "All scores meet their thresholds: continue monitoring".into(),
        });
    }

    out.sort_by_key(|r| r.priority);
    out
}
