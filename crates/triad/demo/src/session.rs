//! Scripted survey session: twelve value questions and twelve scenarios.

use triad_types::{AnalysisInput, CategoricalAnswer, Facet};

fn value(id: usize, option: &str, weights: &[(Facet, f64)]) -> CategoricalAnswer {
    weights.iter().fold(
        CategoricalAnswer::new(format!("value-{:02}", id), option),
        |answer, (facet, weight)| answer.with_weight(*facet, *weight),
    )
}

fn scenario(id: usize, option: &str, weights: &[(Facet, f64)], text: &str) -> CategoricalAnswer {
    weights
        .iter()
        .fold(
            CategoricalAnswer::new(format!("scenario-{:02}", id), option),
            |answer, (facet, weight)| answer.with_weight(*facet, *weight),
        )
        .with_text(text)
}

/// A respondent leaning toward initiative and clarity, who withdraws under
/// pressure.
pub fn sample_session() -> AnalysisInput {
    use Facet::*;

    let core = vec![
        value(1, "a", &[(Heaven, 3.0), (Fire, 1.0)]),
        value(2, "c", &[(Fire, 2.0), (Lake, 1.0)]),
        value(3, "b", &[(Heaven, 2.0), (Thunder, 1.0)]),
        value(4, "d", &[(Water, 1.5), (Mountain, 0.5)]),
        value(5, "a", &[(Heaven, 2.5)]),
        value(6, "b", &[(Fire, 2.0), (Earth, -0.5)]),
        value(7, "c", &[(Wind, 1.0), (Heaven, 1.0)]),
        value(8, "a", &[(Thunder, 1.5), (Fire, 0.5)]),
        value(9, "e", &[(Mountain, 1.0)]),
        value(10, "b", &[(Heaven, 1.5), (Lake, 0.5)]),
        value(11, "a", &[(Fire, 1.5), (Water, 0.5)]),
        value(12, "c", &[(Earth, 1.0), (Heaven, 1.0)]),
    ];

    let scenarios = vec![
        scenario(1, "b", &[(Lake, 2.0), (Wind, 1.0)], "I try to keep the peace and smooth over tension"),
        scenario(2, "a", &[(Mountain, 1.5)], "I often withdraw and need time alone"),
        scenario(3, "c", &[(Lake, 1.5), (Earth, 0.5)], "I stay calm and look for a compromise"),
        scenario(4, "d", &[(Water, 1.0), (Mountain, 1.0)], "I feel overwhelmed and step back completely"),
        scenario(5, "b", &[(Wind, 1.5)], "I sometimes rethink the plan and find a new way"),
        scenario(6, "a", &[(Mountain, 2.0)], "I retreat and avoid people when stressed"),
        scenario(7, "c", &[(Earth, 1.5), (Lake, 0.5)], "I apologize even when it was not my fault"),
        scenario(8, "e", &[(Water, 1.5)], "I keep going and tough it out"),
        scenario(9, "b", &[(Lake, 1.0), (Fire, 1.0)], "I joke to change the subject"),
        scenario(10, "a", &[(Mountain, 1.0), (Water, 0.5)], "I hide and never answer messages when anxious"),
        scenario(11, "d", &[(Heaven, 1.0)], "I take charge and organize everyone"),
        scenario(12, "c", &[(Wind, 1.0), (Lake, 1.0)], "I am relaxed and talk it through"),
    ];

    AnalysisInput::new(core, scenarios)
}
