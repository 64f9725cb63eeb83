use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use triad_classifier::{
    FeatureVectorBuilder, InstanceClassifier, StressPatternExtractor, StressProfile,
};
use triad_evaluation::{ConsistencyBalanceEvaluator, ResultSet, ResultValidator};
use triad_types::{
    AnalysisInput, CategoricalAnswer, ClassifierResult, InstanceRole, ReferenceData, TriadError,
};

use crate::analysis::{RoleReading, TripleAnalysis};
use crate::cache::{AnalysisCache, CacheStats, InputDigest};
use crate::config::EngineConfig;
use crate::defaults::role_default;
use crate::interpretation::InterpretationRegistry;

/// Runs Core, then Derived1 and Derived2 against Core's result, then
/// validation and evaluation.
///
/// A failing instance is replaced by its role default and the run
/// continues. Lookup-integrity errors are never absorbed.
pub struct MultiInstanceOrchestrator {
    reference: Arc<ReferenceData>,
    config: EngineConfig,
    cache: Option<Arc<AnalysisCache>>,
    interpretations: InterpretationRegistry,
    reference_digest: String,
    interpretation_digest: String,
}

impl MultiInstanceOrchestrator {
    pub fn new(reference: Arc<ReferenceData>, config: EngineConfig) -> Result<Self, TriadError> {
        config.validate()?;
        reference.combination.verify()?;
        let reference_digest = reference.digest()?;
        let cache = (config.cache_capacity > 0)
            .then(|| Arc::new(AnalysisCache::new(config.cache_capacity)));
        let interpretations = InterpretationRegistry::from_reference(&reference);
        let interpretation_digest = interpretations.digest();
        info!(
            mode = ?config.selection_mode,
            cache_capacity = config.cache_capacity,
            reference = %&reference_digest[..12],
            "Orchestrator ready"
        );
        Ok(Self {
            reference,
            config,
            cache,
            interpretations,
            reference_digest,
            interpretation_digest,
        })
    }

    /// Share a cache between orchestrators. Keys include the config, the
    /// reference digest and the interpretation digest, so differing setups
    /// never collide.
    pub fn with_cache(mut self, cache: Arc<AnalysisCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_interpretations(mut self, interpretations: InterpretationRegistry) -> Self {
        self.interpretation_digest = interpretations.digest();
        self.interpretations = interpretations;
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference_digest(&self) -> &str {
        &self.reference_digest
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    pub fn analyze(&self, input: &AnalysisInput) -> Result<TripleAnalysis, TriadError> {
        validate_input(input)?;

        let digest = InputDigest::of_run(
            input,
            &self.config,
            &self.reference_digest,
            &self.interpretation_digest,
        )?;
        // serde_json writes non-finite floats as null, so such inputs could
        // collide with other keys
        let cacheable = input
            .core_answers
            .iter()
            .chain(&input.scenario_answers)
            .all(CategoricalAnswer::has_finite_weights);
        if cacheable {
            if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&digest)) {
                debug!(digest = ?digest, "Analysis served from cache");
                return Ok(hit);
            }
        }

        info!(
            core_answers = input.core_answers.len(),
            scenario_answers = input.scenario_answers.len(),
            "Starting triple analysis"
        );

        let classifier = InstanceClassifier::new(
            &self.reference,
            &self.config.resolver,
            self.config.selection_mode,
        );

        let core = self.stage(InstanceRole::Core, || {
            classifier.classify_core(&input.core_answers)
        })?;

        let derived1 = self.stage(InstanceRole::Derived1, || {
            let raw = FeatureVectorBuilder::build(&input.scenario_answers);
            classifier.classify_derived(
                InstanceRole::Derived1,
                &raw,
                &core,
                &self.config.derived1_influence,
            )
        })?;

        let extraction = StressPatternExtractor::new(&self.config.stress)
            .extract(&input.scenario_answers)
            .map_err(|e| e.into_triad(InstanceRole::Derived2));
        let (raw_stress, stress_profile) = match extraction {
            Ok((raw, profile)) => (Ok(raw), profile),
            Err(e) => (Err(e), StressProfile::empty()),
        };
        let derived2 = self.stage(InstanceRole::Derived2, || {
            let raw = raw_stress?;
            classifier.classify_derived(
                InstanceRole::Derived2,
                &raw,
                &core,
                &self.config.derived2_influence,
            )
        })?;

        let results = ResultSet::new(&core, &derived1, &derived2);
        let validation = ResultValidator::new(&self.reference.combination).validate(results)?;
        let interaction = ConsistencyBalanceEvaluator::new(&self.reference, &self.config.evaluation)
            .evaluate(results, &validation);
        let readings = self.readings(results);
        let status = interaction.status;

        let analysis = TripleAnalysis {
            input_digest: digest,
            core,
            derived1,
            derived2,
            stress_profile,
            validation,
            interaction,
            readings,
            status,
            analyzed_at: Utc::now(),
        };

        info!(
            core = analysis.core.archetype_id.get(),
            derived1 = analysis.derived1.archetype_id.get(),
            derived2 = analysis.derived2.archetype_id.get(),
            status = %analysis.status,
            degraded = analysis.is_degraded(),
            "Triple analysis complete"
        );

        if cacheable {
            if let Some(cache) = &self.cache {
                cache.insert(digest, analysis.clone());
            }
        }
        Ok(analysis)
    }

    /// Run one instance; on a non-integrity failure substitute the role default.
    fn stage<F>(&self, role: InstanceRole, run: F) -> Result<ClassifierResult, TriadError>
    where
        F: FnOnce() -> Result<ClassifierResult, TriadError>,
    {
        match run() {
            Ok(result) => Ok(result),
            Err(e) if e.is_integrity_violation() => Err(e),
            Err(e) => {
                warn!(role = %role, error = %e, "Instance failed, substituting role default");
                role_default(role, &self.reference)
            }
        }
    }

    fn readings(&self, results: ResultSet<'_>) -> Vec<RoleReading> {
        results
            .all()
            .iter()
            .map(|r| {
                let record = self.reference.catalog.get(r.archetype_id);
                let reading = self
                    .interpretations
                    .reading(r.role, r.archetype_id)
                    .map(str::to_string)
                    .unwrap_or_else(|| record.theme.clone());
                RoleReading {
                    role: r.role,
                    archetype_id: r.archetype_id,
                    name: record.name.clone(),
                    reading,
                }
            })
            .collect()
    }
}

fn validate_input(input: &AnalysisInput) -> Result<(), TriadError> {
    if input.is_empty() {
        return Err(TriadError::InvalidInput("no answers supplied".into()));
    }
    let core_ids = unique_ids("core", &input.core_answers)?;
    let scenario_ids = unique_ids("scenario", &input.scenario_answers)?;
    if let Some(shared) = core_ids.intersection(&scenario_ids).min() {
        return Err(TriadError::InvalidInput(format!(
            "question {} appears in both core and scenario answers",
            shared
        )));
    }
    Ok(())
}

fn unique_ids<'a>(
    subset: &str,
    answers: &'a [CategoricalAnswer],
) -> Result<HashSet<&'a str>, TriadError> {
    let mut ids = HashSet::with_capacity(answers.len());
    for answer in answers {
        let id = answer.question_id.trim();
        if id.is_empty() {
            return Err(TriadError::InvalidInput(format!(
                "blank question id in {} answers",
                subset
            )));
        }
        if !ids.insert(id) {
            return Err(TriadError::InvalidInput(format!(
                "question {} answered twice in {} answers",
                id, subset
            )));
        }
    }
    Ok(ids)
}
