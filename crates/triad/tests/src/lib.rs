#![deny(unsafe_code)]
//! Shared fixtures for the cross-crate e2e and property suites.

use std::sync::Arc;

use triad_classifier::UNIFORM_ENERGY;
use triad_engine::{EngineConfig, MultiInstanceOrchestrator};
use triad_types::{
    CategoricalAnswer, ClassifierResult, CombinationTable, Facet, FacetEnergyMap, InstanceRole,
    ReferenceData, SelectionMethod,
};

pub fn reference() -> Arc<ReferenceData> {
    Arc::new(ReferenceData::standard())
}

pub fn orchestrator(config: EngineConfig) -> MultiInstanceOrchestrator {
    MultiInstanceOrchestrator::new(reference(), config).expect("standard setup is valid")
}

/// `count` answers that each weight `facet` by `weight` and nothing else.
pub fn single_facet_answers(
    prefix: &str,
    facet: Facet,
    weight: f64,
    count: usize,
) -> Vec<CategoricalAnswer> {
    (0..count)
        .map(|i| CategoricalAnswer::new(format!("{}-{}", prefix, i), "a").with_weight(facet, weight))
        .collect()
}

/// Standard reference data with one table cell overwritten, bypassing
/// validation.
pub fn corrupted_reference(upper: Facet, lower: Facet, value: u8) -> ReferenceData {
    let mut cells = *CombinationTable::king_wen().cells();
    cells[upper.index()][lower.index()] = value;
    ReferenceData {
        combination: CombinationTable::from_cells_unchecked(cells),
        ..ReferenceData::standard()
    }
}

/// Standard reference JSON with one table cell overwritten.
pub fn corrupted_reference_json(upper: Facet, lower: Facet, value: u8) -> String {
    let json = ReferenceData::standard()
        .to_json_string()
        .expect("standard reference serializes");
    let mut doc: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    doc["combination"][upper.index()][lower.index()] = serde_json::Value::from(value);
    doc.to_string()
}

/// A hand-built result resolved through the standard table.
pub fn result_for(
    role: InstanceRole,
    upper: Facet,
    lower: Facet,
    energies: FacetEnergyMap,
) -> ClassifierResult {
    let id = CombinationTable::king_wen()
        .lookup(upper, lower)
        .expect("king wen table is total");
    ClassifierResult {
        role,
        archetype_id: id,
        upper_facet: upper,
        lower_facet: lower,
        facet_energy_map: energies,
        harmony_score: 0.0,
        alternative_candidates: Vec::new(),
        improvement_hints: Vec::new(),
        selection_method: SelectionMethod::Legacy,
        legacy_archetype_id: id,
        degraded: false,
    }
}

/// Core result carrying exactly `energies`, as the influence adjuster sees it.
pub fn core_with_energies(energies: FacetEnergyMap) -> ClassifierResult {
    let (upper, lower) = {
        let ranked = energies.ranked();
        (ranked[0], ranked[1])
    };
    result_for(InstanceRole::Core, upper, lower, energies)
}

pub fn uniform_energies() -> FacetEnergyMap {
    FacetEnergyMap::splat(UNIFORM_ENERGY)
}
