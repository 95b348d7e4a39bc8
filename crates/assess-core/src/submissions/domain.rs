use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

/// Student identity recovered from a submission filename. Either field may be
/// missing; ungraded intake is still accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
}

/// One piece of student work as received, before any grading happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub filename: String,
    pub content: String,
    pub identity: StudentIdentity,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        let filename = filename.into();
        let identity = crate::submissions::identity::parse_filename(&filename);
        Self {
            filename,
            content: content.into(),
            identity,
            submitted_at: Utc::now(),
        }
    }
}

/// Lifecycle of a stored submission. `Failed` marks a repository or source
/// fault, not a low score; a scoring panic still yields `Evaluated` with the
/// fail-safe assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    Evaluated,
    Failed,
}

impl SubmissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Evaluated => "evaluated",
            SubmissionStatus::Failed => "failed",
        }
    }
}
