//! Assessment outcome types shared by the engine, reports, and the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rubric::Category;

/// Score breakdown keyed by category. `BTreeMap` keeps serialized output in
/// a stable category order.
pub type Breakdown = BTreeMap<Category, CategoryResult>;

/// One category's scored outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResult {
    /// Weighted score, already normalized onto the category weight.
    pub score: f64,
    /// Maximum achievable for this category, i.e. its rubric weight.
    pub max_score: f64,
    /// Score as a percentage of the weight, rounded to two decimals.
    pub percentage: f64,
    /// Signal notes that fired while scoring, in signal order.
    pub feedback: Vec<String>,
}

/// Narrative feedback synthesized from a breakdown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub strengths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub improvements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub recommendations: Vec<String>,
}

/// A complete graded result for one submission. Derived entirely from the
/// input text and the rubric; grading the same text twice yields equal
/// values. When it was graded is the repository record's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub total_score: f64,
    pub grade: &'static str,
    pub breakdown: Breakdown,
    pub feedback: FeedbackSummary,
}

impl Assessment {
    /// Fail-safe result returned when scoring itself breaks. The submission
    /// still gets a terminal, renderable assessment rather than an error page.
    pub fn unable_to_evaluate() -> Self {
        Self {
            total_score: 0.0,
            grade: "F",
            breakdown: Breakdown::new(),
            feedback: FeedbackSummary {
                strengths: Vec::new(),
                improvements: vec!["Unable to evaluate submission".to_string()],
                recommendations: vec![
                    "Please resubmit with correct file format".to_string()
                ],
            },
        }
    }

    pub fn passed(&self, threshold: f64) -> bool {
        self.total_score >= threshold
    }
}

/// Letter grade for a total score on the 0..=100 scale. Boundaries are
/// inclusive at the lower edge of each band.
pub fn letter_grade(total: f64) -> &'static str {
    if total >= 90.0 {
        "A+"
    } else if total >= 85.0 {
        "A"
    } else if total >= 80.0 {
        "A-"
    } else if total >= 75.0 {
        "B+"
    } else if total >= 70.0 {
        "B"
    } else if total >= 65.0 {
        "B-"
    } else if total >= 60.0 {
        "C+"
    } else if total >= 55.0 {
        "C"
    } else if total >= 50.0 {
        "C-"
    } else if total >= 45.0 {
        "D"
    } else {
        "F"
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
