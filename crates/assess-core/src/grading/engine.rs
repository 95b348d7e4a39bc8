use std::panic::{self, AssertUnwindSafe};

use super::assessment::{letter_grade, round2, Assessment, Breakdown, CategoryResult};
use super::categories::CategoryDefinition;
use super::feedback;
use super::rubric::Rubric;
use super::signals::{self, TextProfile};

/// Scores submission text against a [`Rubric`]. Stateless and cheap to share
/// behind an `Arc`.
pub struct EvaluationEngine {
    rubric: Rubric,
}

impl EvaluationEngine {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// Grade one submission. Scoring is pure, but a panic inside it must not
    /// take down the caller, so it runs under `catch_unwind` and degrades to
    /// the fail-safe assessment.
    pub fn evaluate(&self, text: &str) -> Assessment {
        match panic::catch_unwind(AssertUnwindSafe(|| self.evaluate_inner(text))) {
            Ok(assessment) => assessment,
            Err(_) => {
                tracing::warn!("evaluation panicked, returning fail-safe assessment");
                Assessment::unable_to_evaluate()
            }
        }
    }

    fn evaluate_inner(&self, text: &str) -> Assessment {
        let profile = TextProfile::of(text);

        let mut breakdown = Breakdown::new();
        for definition in self.rubric.categories() {
            let result = score_category(definition, text, &profile);
            breakdown.insert(definition.category, result);
        }

        let total_score = round2(breakdown.values().map(|result| result.score).sum());
        let feedback = feedback::synthesize(&breakdown, total_score);

        Assessment {
            total_score,
            grade: letter_grade(total_score),
            breakdown,
            feedback,
        }
    }
}

fn score_category(
    definition: &CategoryDefinition,
    text: &str,
    profile: &TextProfile,
) -> CategoryResult {
    if !definition.gate.passes(profile) {
        return CategoryResult {
            score: 0.0,
            max_score: definition.weight,
            percentage: 0.0,
            feedback: vec![definition.gate.note.to_string()],
        };
    }

    let (raw, mut notes) = signals::accumulate(text, profile, &definition.signals);
    if notes.is_empty() {
        notes.push(definition.fallback_note.to_string());
    }

    let score = round2(
        (f64::from(raw) / definition.ceiling * definition.weight).min(definition.weight),
    );
    let percentage = round2(score / definition.weight * 100.0);

    CategoryResult {
        score,
        max_score: definition.weight,
        percentage,
        feedback: notes,
    }
}
