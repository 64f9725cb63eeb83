use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::facet::Facet;

/// One recorded answer to a categorical survey question.
///
/// `facet_weights` may be empty or carry negative values (an option can
/// penalize a facet). A missing map deserializes as empty and contributes
/// nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoricalAnswer {
    pub question_id: String,
    pub selected_option_id: String,
    #[serde(default)]
    pub facet_weights: BTreeMap<Facet, f64>,
    /// Free text of the chosen option, read by the stress extractor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
}

impl CategoricalAnswer {
    pub fn new(question_id: impl Into<String>, selected_option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            selected_option_id: selected_option_id.into(),
            facet_weights: BTreeMap::new(),
            response_text: None,
        }
    }

    pub fn with_weight(mut self, facet: Facet, weight: f64) -> Self {
        *self.facet_weights.entry(facet).or_insert(0.0) += weight;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    /// Facet carrying the largest strictly positive weight, canonical order
    /// on ties.
    pub fn strongest_positive_facet(&self) -> Option<Facet> {
        let mut best: Option<(Facet, f64)> = None;
        for (facet, weight) in &self.facet_weights {
            if !weight.is_finite() || *weight <= 0.0 {
                continue;
            }
            match best {
                Some((_, w)) if *weight <= w => {}
                _ => best = Some((*facet, *weight)),
            }
        }
        best.map(|(facet, _)| facet)
    }

    pub fn has_finite_weights(&self) -> bool {
        self.facet_weights.values().all(|w| w.is_finite())
    }
}

/// The two answer subsets supplied for one analysis session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Feeds the Core instance.
    pub core_answers: Vec<CategoricalAnswer>,
    /// Feeds Derived1 directly and Derived2 through stress extraction.
    pub scenario_answers: Vec<CategoricalAnswer>,
}

impl AnalysisInput {
    pub fn new(
        core_answers: Vec<CategoricalAnswer>,
        scenario_answers: Vec<CategoricalAnswer>,
    ) -> Self {
        Self {
            core_answers,
            scenario_answers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.core_answers.is_empty() && self.scenario_answers.is_empty()
    }
}
