use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grading::{Category, FeedbackSummary};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub category_label: &'static str,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub criteria: &'static [&'static str],
    pub feedback: Vec<String>,
}

/// Sanitized representation of a stored submission for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionView {
    pub id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<&'static str>,
}

/// Full per-student report: the submission header plus the graded breakdown
/// and narrative feedback, when grading has happened.
#[derive(Debug, Clone, Serialize)]
pub struct StudentReportView {
    pub submission: SubmissionView,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<CategoryRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeDistributionEntry {
    pub grade: &'static str,
    pub count: usize,
}

/// Cohort-level statistics for the overview endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ClassOverview {
    pub total_submissions: usize,
    pub evaluated: usize,
    pub pending: usize,
    pub average_score: f64,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    pub grade_distribution: Vec<GradeDistributionEntry>,
}
