use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{Submission, SubmissionId, SubmissionStatus};
use super::repository::{RepositoryError, SubmissionRecord, SubmissionRepository};
use super::source::IncomingDocument;
use crate::grading::EvaluationEngine;

/// Service composing the repository and the scoring engine into the grading
/// workflow: accept, evaluate, query.
pub struct SubmissionService<R> {
    repository: Arc<R>,
    engine: Arc<EvaluationEngine>,
    pass_threshold: f64,
}

static SUBMISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_submission_id() -> SubmissionId {
    let id = SUBMISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SubmissionId(format!("sub-{id:06}"))
}

impl<R> SubmissionService<R>
where
    R: SubmissionRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: Arc<EvaluationEngine>, pass_threshold: f64) -> Self {
        Self {
            repository,
            engine,
            pass_threshold,
        }
    }

    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    pub fn engine(&self) -> &EvaluationEngine {
        &self.engine
    }

    /// Accept a new submission, returning the repository-backed record in
    /// `Pending` state.
    pub fn submit(&self, submission: Submission) -> Result<SubmissionRecord, SubmissionServiceError> {
        let record = SubmissionRecord {
            id: next_submission_id(),
            submission,
            status: SubmissionStatus::Pending,
            assessment: None,
            evaluated_at: None,
        };
        let stored = self.repository.insert(record)?;
        tracing::info!(id = %stored.id.0, filename = %stored.submission.filename, "submission accepted");
        Ok(stored)
    }

    /// Grade a stored submission and persist the outcome. Re-evaluation of an
    /// already graded submission overwrites the previous assessment.
    pub fn evaluate(&self, id: &SubmissionId) -> Result<SubmissionRecord, SubmissionServiceError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let assessment = self.engine.evaluate(&record.submission.content);
        tracing::info!(
            id = %record.id.0,
            total_score = assessment.total_score,
            grade = assessment.grade,
            "submission evaluated"
        );

        record.status = SubmissionStatus::Evaluated;
        record.assessment = Some(assessment);
        record.evaluated_at = Some(Utc::now());
        if let Err(err) = self.repository.update(record.clone()) {
            tracing::warn!(id = %record.id.0, error = %err, "persisting assessment failed");
            record.status = SubmissionStatus::Failed;
            record.assessment = None;
            record.evaluated_at = None;
            // Best effort; if the store is still down the record stays as-is.
            let _ = self.repository.update(record);
            return Err(err.into());
        }

        Ok(record)
    }

    /// Accept and immediately grade a document picked up from a source.
    pub fn ingest(
        &self,
        document: IncomingDocument,
    ) -> Result<SubmissionRecord, SubmissionServiceError> {
        let stored = self.submit(Submission::new(document.filename, document.content))?;
        self.evaluate(&stored.id)
    }

    pub fn get(&self, id: &SubmissionId) -> Result<SubmissionRecord, SubmissionServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<SubmissionRecord>, SubmissionServiceError> {
        Ok(self.repository.list()?)
    }

    pub fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, SubmissionServiceError> {
        Ok(self.repository.pending(limit)?)
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
