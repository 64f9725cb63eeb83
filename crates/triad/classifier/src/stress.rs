//! Stress-response classification feeding the Derived2 instance.
//!
//! Each scenario answer gets an intensity in `[0, 1]` from keyword tiers and
//! at most one of eight defensive patterns. An answer with no keyword hit
//! and no positive weight stays unclassified and contributes nothing. A pattern contributes to exactly two
//! facets; contributions are scaled by intensity and summed into the raw
//! vector that the normalizer then rescales.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use triad_types::{CategoricalAnswer, Facet, FeatureVector, TriadError};

use crate::error::ClassifierError;
use crate::vector::FeatureVectorBuilder;

const BASELINE_INTENSITY: f64 = 0.5;
const HIGH_STEP: f64 = 0.15;
const MEDIUM_STEP: f64 = 0.05;
const LOW_STEP: f64 = 0.10;

/// Intensity above which an answer counts as an activation trigger.
pub const ACTIVATION_THRESHOLD: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensivePattern {
    Retreat,
    Confront,
    Evade,
    Endure,
    Transform,
    Boundary,
    Harmonize,
    Fortify,
}

impl DefensivePattern {
    pub const ALL: [DefensivePattern; 8] = [
        Self::Retreat,
        Self::Confront,
        Self::Evade,
        Self::Endure,
        Self::Transform,
        Self::Boundary,
        Self::Harmonize,
        Self::Fortify,
    ];

    /// `(facet, weight)` pairs, primary first.
    pub fn contributions(self) -> &'static [(Facet, f64)] {
        match self {
            Self::Retreat => &[(Facet::Earth, 0.8), (Facet::Mountain, 0.3)],
            Self::Confront => &[(Facet::Heaven, 0.8), (Facet::Thunder, 0.4)],
            Self::Evade => &[(Facet::Wind, 0.8), (Facet::Lake, 0.3)],
            Self::Endure => &[(Facet::Water, 0.8), (Facet::Mountain, 0.4)],
            Self::Transform => &[(Facet::Fire, 0.8), (Facet::Wind, 0.3)],
            Self::Boundary => &[(Facet::Mountain, 0.8), (Facet::Earth, 0.3)],
            Self::Harmonize => &[(Facet::Lake, 0.8), (Facet::Earth, 0.3)],
            Self::Fortify => &[(Facet::Thunder, 0.8), (Facet::Heaven, 0.3)],
        }
    }

    pub fn primary_facet(self) -> Facet {
        self.contributions()[0].0
    }

    /// The pattern whose primary facet is `facet`.
    pub fn for_facet(facet: Facet) -> DefensivePattern {
        match facet {
            Facet::Heaven => Self::Confront,
            Facet::Lake => Self::Harmonize,
            Facet::Fire => Self::Transform,
            Facet::Thunder => Self::Fortify,
            Facet::Wind => Self::Evade,
            Facet::Water => Self::Endure,
            Facet::Mountain => Self::Boundary,
            Facet::Earth => Self::Retreat,
        }
    }
}

impl fmt::Display for DefensivePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Retreat => "retreat",
            Self::Confront => "confront",
            Self::Evade => "evade",
            Self::Endure => "endure",
            Self::Transform => "transform",
            Self::Boundary => "boundary",
            Self::Harmonize => "harmonize",
            Self::Fortify => "fortify",
        };
        write!(f, "{}", name)
    }
}

/// Keyword tiers and per-pattern keywords. Matching is case-insensitive
/// substring search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressLexicon {
    pub high_intensity: Vec<String>,
    pub medium_intensity: Vec<String>,
    pub low_intensity: Vec<String>,
    pub patterns: BTreeMap<DefensivePattern, Vec<String>>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

impl Default for StressLexicon {
    fn default() -> Self {
        let mut patterns = BTreeMap::new();
        patterns.insert(
            DefensivePattern::Retreat,
            words(&["withdraw", "retreat", "hide", "alone", "step back", "avoid people"]),
        );
        patterns.insert(
            DefensivePattern::Confront,
            words(&["confront", "argue", "fight", "push back", "challenge", "insist"]),
        );
        patterns.insert(
            DefensivePattern::Evade,
            words(&["distract", "joke", "change the subject", "postpone", "ignore"]),
        );
        patterns.insert(
            DefensivePattern::Endure,
            words(&["endure", "persist", "tough it out", "keep going", "hold on"]),
        );
        patterns.insert(
            DefensivePattern::Transform,
            words(&["reframe", "rethink", "reinvent", "new approach", "find a new way"]),
        );
        patterns.insert(
            DefensivePattern::Boundary,
            words(&["refuse", "say no", "draw a line", "boundary", "boundaries"]),
        );
        patterns.insert(
            DefensivePattern::Harmonize,
            words(&["compromise", "smooth over", "reconcile", "apologize", "keep the peace"]),
        );
        patterns.insert(
            DefensivePattern::Fortify,
            words(&["prepare", "take charge", "organize", "act fast", "take control"]),
        );

        Self {
            high_intensity: words(&[
                "always", "never", "panic", "overwhelmed", "furious", "terrified",
                "immediately", "completely", "desperate",
            ]),
            medium_intensity: words(&[
                "often", "stressed", "anxious", "worried", "frustrated", "upset", "tense",
            ]),
            low_intensity: words(&["sometimes", "calm", "slightly", "rarely", "relaxed"]),
            patterns,
        }
    }
}

impl StressLexicon {
    pub fn validate(&self) -> Result<(), TriadError> {
        let all = self
            .high_intensity
            .iter()
            .chain(&self.medium_intensity)
            .chain(&self.low_intensity)
            .chain(self.patterns.values().flatten());
        for keyword in all {
            if keyword.trim().is_empty() {
                return Err(TriadError::InvalidConfig(
                    "stress lexicon contains an empty keyword".into(),
                ));
            }
        }
        Ok(())
    }
}

fn hits(text: &str, keywords: &[String]) -> usize {
    keywords
        .iter()
        .map(|k| text.matches(k.to_lowercase().as_str()).count())
        .sum()
}

/// Classification of one scenario answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressResponse {
    pub question_id: String,
    pub intensity: f64,
    /// `None` when the answer carries no pattern signal.
    pub pattern: Option<DefensivePattern>,
}

/// Session-level summary returned alongside the Derived2 result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressProfile {
    pub responses: Vec<StressResponse>,
    /// Mean intensity, 0 with no responses.
    pub overall_stress_level: f64,
    /// Question ids whose intensity exceeds [`ACTIVATION_THRESHOLD`].
    pub activation_triggers: Vec<String>,
    /// Most frequent pattern, canonical order on ties; `None` when no
    /// answer was classified.
    pub dominant_pattern: Option<DefensivePattern>,
}

impl StressProfile {
    pub fn empty() -> Self {
        Self {
            responses: Vec::new(),
            overall_stress_level: 0.0,
            activation_triggers: Vec::new(),
            dominant_pattern: None,
        }
    }

    fn from_responses(responses: Vec<StressResponse>) -> Self {
        if responses.is_empty() {
            return Self::empty();
        }
        let overall_stress_level =
            responses.iter().map(|r| r.intensity).sum::<f64>() / responses.len() as f64;
        let activation_triggers = responses
            .iter()
            .filter(|r| r.intensity > ACTIVATION_THRESHOLD)
            .map(|r| r.question_id.clone())
            .collect();

        let mut counts: BTreeMap<DefensivePattern, usize> = BTreeMap::new();
        for pattern in responses.iter().filter_map(|r| r.pattern) {
            *counts.entry(pattern).or_insert(0) += 1;
        }
        let mut dominant_pattern = None;
        let mut best = 0;
        // BTreeMap order is the canonical pattern order
        for (pattern, count) in counts {
            if count > best {
                best = count;
                dominant_pattern = Some(pattern);
            }
        }

        Self {
            responses,
            overall_stress_level,
            activation_triggers,
            dominant_pattern,
        }
    }
}

pub struct StressPatternExtractor<'a> {
    lexicon: &'a StressLexicon,
}

impl<'a> StressPatternExtractor<'a> {
    pub fn new(lexicon: &'a StressLexicon) -> Self {
        Self { lexicon }
    }

    pub fn classify(&self, answer: &CategoricalAnswer) -> Result<StressResponse, ClassifierError> {
        if !answer.has_finite_weights() {
            return Err(ClassifierError::NonFiniteWeight {
                question_id: answer.question_id.clone(),
            });
        }

        let text = answer
            .response_text
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        let intensity = (BASELINE_INTENSITY
            + HIGH_STEP * hits(&text, &self.lexicon.high_intensity) as f64
            + MEDIUM_STEP * hits(&text, &self.lexicon.medium_intensity) as f64
            - LOW_STEP * hits(&text, &self.lexicon.low_intensity) as f64)
            .clamp(0.0, 1.0);

        let mut pattern = None;
        let mut best = 0;
        for (candidate, keywords) in &self.lexicon.patterns {
            let count = hits(&text, keywords);
            if count > best {
                best = count;
                pattern = Some(*candidate);
            }
        }
        if pattern.is_none() {
            pattern = answer
                .strongest_positive_facet()
                .map(DefensivePattern::for_facet);
        }

        Ok(StressResponse {
            question_id: answer.question_id.clone(),
            intensity,
            pattern,
        })
    }

    /// Classify every answer and build the Derived2 raw vector.
    pub fn extract(
        &self,
        answers: &[CategoricalAnswer],
    ) -> Result<(FeatureVector, StressProfile), ClassifierError> {
        let mut builder = FeatureVectorBuilder::new();
        let mut responses = Vec::with_capacity(answers.len());
        for answer in answers {
            let response = self.classify(answer)?;
            if let Some(pattern) = response.pattern {
                for (facet, weight) in pattern.contributions() {
                    builder.add_weight(*facet, weight * response.intensity);
                }
            }
            responses.push(response);
        }

        let profile = StressProfile::from_responses(responses);
        debug!(
            responses = profile.responses.len(),
            stress = profile.overall_stress_level,
            pattern = ?profile.dominant_pattern,
            "Stress patterns extracted"
        );
        Ok((builder.finish(), profile))
    }
}
