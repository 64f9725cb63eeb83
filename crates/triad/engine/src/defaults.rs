use triad_classifier::UNIFORM_ENERGY;
use triad_types::{
    ClassifierResult, Facet, FacetEnergyMap, InstanceRole, ReferenceData, SelectionMethod,
    TriadError,
};

/// Facet pair substituted for a role whose pipeline failed.
pub fn default_pair(role: InstanceRole) -> (Facet, Facet) {
    match role {
        InstanceRole::Core => (Facet::Heaven, Facet::Heaven),
        InstanceRole::Derived1 => (Facet::Earth, Facet::Heaven),
        InstanceRole::Derived2 => (Facet::Water, Facet::Mountain),
    }
}

/// Documented default result. The id goes through the injected table so
/// the default always round-trips; a corrupted cell still surfaces.
pub fn role_default(role: InstanceRole, reference: &ReferenceData) -> Result<ClassifierResult, TriadError> {
    let (upper, lower) = default_pair(role);
    let archetype_id = reference.combination.lookup(upper, lower)?;
    Ok(ClassifierResult {
        role,
        archetype_id,
        upper_facet: upper,
        lower_facet: lower,
        facet_energy_map: FacetEnergyMap::splat(UNIFORM_ENERGY),
        harmony_score: 0.0,
        alternative_candidates: Vec::new(),
        improvement_hints: Vec::new(),
        selection_method: SelectionMethod::Defaulted,
        legacy_archetype_id: archetype_id,
        degraded: true,
    })
}
