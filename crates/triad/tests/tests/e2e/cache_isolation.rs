//! E2E: the analysis cache is an injected, bounded, clearable resource.

use std::sync::Arc;

use triad_engine::{
    AnalysisCache, EngineConfig, InterpretationRegistry, MultiInstanceOrchestrator,
};
use triad_tests::{reference, single_facet_answers};
use triad_types::{AnalysisInput, Facet, InstanceRole};

fn input(facet: Facet) -> AnalysisInput {
    AnalysisInput::new(
        single_facet_answers("c", facet, 2.0, 5),
        single_facet_answers("s", Facet::Lake, 1.0, 5),
    )
}

#[test]
fn shared_cache_serves_second_orchestrator() {
    let cache = Arc::new(AnalysisCache::new(8));
    let first = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());
    let second = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());

    let a = first.analyze(&input(Facet::Fire)).unwrap();
    let b = second.analyze(&input(Facet::Fire)).unwrap();
    assert_eq!(a.analyzed_at, b.analyzed_at);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn differing_configs_do_not_share_entries() {
    let cache = Arc::new(AnalysisCache::new(8));
    let harmony = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());
    let legacy = MultiInstanceOrchestrator::new(reference(), EngineConfig::legacy())
        .unwrap()
        .with_cache(cache.clone());

    let a = harmony.analyze(&input(Facet::Wind)).unwrap();
    let b = legacy.analyze(&input(Facet::Wind)).unwrap();
    assert_ne!(a.input_digest, b.input_digest);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn clear_forces_recomputation() {
    let cache = Arc::new(AnalysisCache::new(4));
    let o = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());

    o.analyze(&input(Facet::Earth)).unwrap();
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
    o.analyze(&input(Facet::Earth)).unwrap();
    assert_eq!(cache.stats().misses, 2);
}

#[test]
fn capacity_bounds_entries() {
    let cache = Arc::new(AnalysisCache::new(2));
    let o = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());
    for facet in [Facet::Heaven, Facet::Lake, Facet::Fire, Facet::Thunder] {
        o.analyze(&input(facet)).unwrap();
    }
    let stats = cache.stats();
    assert_eq!(stats.entries, 2);
    assert_eq!(stats.evictions, 2);
    assert_eq!(stats.capacity, 2);
}

#[test]
fn differing_interpretations_do_not_share_readings() {
    let cache = Arc::new(AnalysisCache::new(8));
    let standard = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_cache(cache.clone());
    let bare = MultiInstanceOrchestrator::new(reference(), EngineConfig::default())
        .unwrap()
        .with_interpretations(InterpretationRegistry::new())
        .with_cache(cache.clone());

    let a = standard.analyze(&input(Facet::Fire)).unwrap();
    let b = bare.analyze(&input(Facet::Fire)).unwrap();
    assert_ne!(a.input_digest, b.input_digest);
    assert_eq!(cache.stats().hits, 0);
    assert_eq!(cache.len(), 2);

    // an empty registry falls back to the catalog theme
    let reference = reference();
    let theme = &reference.catalog.get(b.core.archetype_id).theme;
    assert_eq!(&b.readings[0].reading, theme);
    assert_eq!(b.readings[0].role, InstanceRole::Core);
    assert_ne!(a.readings[0].reading, b.readings[0].reading);

    let b_again = bare.analyze(&input(Facet::Fire)).unwrap();
    assert_eq!(b.readings, b_again.readings);
    assert_eq!(cache.stats().hits, 1);
}
