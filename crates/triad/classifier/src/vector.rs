use triad_types::{CategoricalAnswer, Facet, FeatureVector};

/// Accumulates answer facet weights into a raw 8-dimensional vector.
///
/// Answers without weights contribute zero; nothing here can fail.
#[derive(Clone, Debug, Default)]
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
    answers: usize,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum every answer's weights in order.
    pub fn build(answers: &[CategoricalAnswer]) -> FeatureVector {
        let mut builder = Self::new();
        for answer in answers {
            builder.add_answer(answer);
        }
        builder.finish()
    }

    pub fn add_answer(&mut self, answer: &CategoricalAnswer) -> &mut Self {
        for (facet, weight) in &answer.facet_weights {
            self.vector[*facet] += *weight;
        }
        self.answers += 1;
        self
    }

    pub fn add_weight(&mut self, facet: Facet, weight: f64) -> &mut Self {
        self.vector[facet] += weight;
        self
    }

    pub fn answer_count(&self) -> usize {
        self.answers
    }

    pub fn finish(self) -> FeatureVector {
        self.vector
    }
}
