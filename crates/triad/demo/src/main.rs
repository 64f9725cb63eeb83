#![deny(unsafe_code)]
//! Triad demo binary.
//!
//! Runs one scripted survey session through the full pipeline:
//! 1. Reference data integrity
//! 2. Harmony-balanced triple analysis
//! 3. Legacy selection for comparison
//! 4. Consistency, balance and integration evaluation
//! 5. Cache behaviour on a repeated session
//!
//! Set `RUST_LOG=debug` to see per-stage pipeline logs.

mod session;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use triad_engine::{EngineConfig, MultiInstanceOrchestrator, TripleAnalysis};
use triad_types::{ClassifierResult, FacetGroup, InstanceRole, ReferenceData};

// ── Formatting Helpers ──────────────────────────────────────────────────

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════╗
 ║                Triad Archetype Engine  --  Demo               ║
 ║                                                               ║
 ║   Three instances, eight facets, sixty-four archetypes.       ║
 ╚═══════════════════════════════════════════════════════════════╝
"#;

fn section(title: &str) {
    let width: usize = 60;
    let pad = width.saturating_sub(title.len() + 4);
    let left = pad / 2;
    let right = pad - left;
    println!();
    println!(" ┌{}┐", "─".repeat(width));
    println!(" │{}  {}  {}│", " ".repeat(left), title, " ".repeat(right));
    println!(" └{}┘", "─".repeat(width));
}

fn ok(msg: &str) {
    println!("   [OK]  {}", msg);
}

fn info(msg: &str) {
    println!("   [--]  {}", msg);
}

fn warn(msg: &str) {
    println!("   [!!]  {}", msg);
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("{}", BANNER);

    if let Err(e) = run_demo() {
        eprintln!();
        eprintln!("   [FATAL]  Demo failed: {}", e);
        std::process::exit(1);
    }

    println!();
    println!(" ════════════════════════════════════════════════════════════════");
    println!("  Demo complete.");
    println!(" ════════════════════════════════════════════════════════════════");
    println!();
}

fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    // ── Phase A: Reference Data ─────────────────────────────────────
    section("Phase A: Reference Data");

    let reference = Arc::new(ReferenceData::standard());
    let distinct = reference.combination.distinct_ids();
    if distinct == 64 {
        ok("Combination table reaches all 64 archetypes");
    } else {
        warn(&format!("Combination table reaches only {} archetypes", distinct));
    }
    info(&format!("Reference digest   : {}", &reference.digest()?[..16]));
    info(&format!(
        "Expressive facets  : {:?}",
        reference
            .partition
            .members(FacetGroup::Expressive)
            .collect::<Vec<_>>()
    ));

    // ── Phase B: Harmony Analysis ───────────────────────────────────
    section("Phase B: Harmony-Balanced Analysis");

    let input = session::sample_session();
    info(&format!(
        "Session: {} value answers, {} scenario answers",
        input.core_answers.len(),
        input.scenario_answers.len()
    ));

    let orchestrator = MultiInstanceOrchestrator::new(reference.clone(), EngineConfig::default())?;
    let analysis = orchestrator.analyze(&input)?;
    for role in InstanceRole::ALL {
        print_result(analysis.result(role));
    }
    print_stress(&analysis);

    // ── Phase C: Legacy Comparison ──────────────────────────────────
    section("Phase C: Legacy Top-Two Selection");

    let legacy = MultiInstanceOrchestrator::new(reference, EngineConfig::legacy())?.analyze(&input)?;
    for role in InstanceRole::ALL {
        let harmony = analysis.result(role);
        let plain = legacy.result(role);
        let line = format!(
            "{:<9} harmony {:<4} legacy {:<4}",
            role.to_string(),
            harmony.archetype_id.to_string(),
            plain.archetype_id.to_string()
        );
        if harmony.archetype_id == plain.archetype_id {
            ok(&line);
        } else {
            info(&format!("{}  (selection differs)", line));
        }
    }

    // ── Phase D: Evaluation ─────────────────────────────────────────
    section("Phase D: Evaluation");

    print_evaluation(&analysis);
    for reading in &analysis.readings {
        info(&format!("{:<9} {}", reading.role.to_string(), reading.reading));
    }

    // ── Phase E: Cache ──────────────────────────────────────────────
    section("Phase E: Cache");

    let again = orchestrator.analyze(&input)?;
    if again == analysis {
        ok("Repeated session served identical analysis");
    } else {
        warn("Repeated session produced a different analysis");
    }
    if let Some(stats) = orchestrator.cache_stats() {
        info(&format!(
            "hits={} misses={} entries={}/{}",
            stats.hits, stats.misses, stats.entries, stats.capacity
        ));
    }

    if std::env::var_os("TRIAD_DEMO_JSON").is_some() {
        println!("{}", analysis.to_json_string()?);
    }

    Ok(())
}

// ── Result helpers ──────────────────────────────────────────────────────

fn print_result(r: &ClassifierResult) {
    let line = format!(
        "{:<9} {:<4} {}/{}  harmony={:.2}  dominant={}",
        r.role.to_string(),
        r.archetype_id.to_string(),
        r.upper_facet,
        r.lower_facet,
        r.harmony_score,
        r.dominant_facet()
    );
    if r.degraded {
        warn(&format!("{}  (degraded)", line));
    } else {
        ok(&line);
    }
    for alt in &r.alternative_candidates {
        info(&format!(
            "          alt {:<4} {}/{}  harmony={:.2}",
            alt.archetype_id.to_string(),
            alt.upper_facet,
            alt.lower_facet,
            alt.harmony_score
        ));
    }
}

fn print_stress(analysis: &TripleAnalysis) {
    let stress = &analysis.stress_profile;
    info(&format!("Stress level       : {:.2}", stress.overall_stress_level));
    let pattern = stress
        .dominant_pattern
        .map_or_else(|| "unclassified".to_string(), |p| p.to_string());
    info(&format!("Dominant pattern   : {}", pattern));
    info(&format!("Activation triggers: {}", stress.activation_triggers.join(", ")));
}

fn print_evaluation(analysis: &TripleAnalysis) {
    let report = &analysis.interaction;
    info(&format!("Consistency : {:.1}", report.consistency));
    info(&format!("Balance     : {:.1}", report.balance));
    info(&format!("Integration : {:.1}", report.integration));
    ok(&format!("Status      : {}", analysis.status));
    if analysis.validation.duplicates.has_duplicates {
        warn(&format!(
            "Shared archetypes: {:?}",
            analysis.validation.duplicates.duplicate_ids
        ));
    }
    for rec in &report.recommendations {
        info(&format!("[{:?}] {}", rec.priority, rec.message));
    }
}
