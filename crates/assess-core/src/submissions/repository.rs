use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Submission, SubmissionId, SubmissionStatus};
use crate::grading::Assessment;

/// Repository record pairing the submission with its grading state. The
/// timestamp lives here, not on the assessment: when grading happened is a
/// persistence fact, the assessment itself is a pure function of the text.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub id: SubmissionId,
    pub submission: Submission,
    pub status: SubmissionStatus,
    pub assessment: Option<Assessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_at: Option<DateTime<Utc>>,
}

/// Storage abstraction so the service and monitor can be exercised in
/// isolation.
pub trait SubmissionRepository: Send + Sync {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError>;
    fn update(&self, record: SubmissionRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// In-memory repository backing the API and tests.
#[derive(Default)]
pub struct MemorySubmissionRepository {
    records: Arc<Mutex<BTreeMap<SubmissionId, SubmissionRecord>>>,
}

impl MemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionRepository for MemorySubmissionRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SubmissionRecord) -> Result<(), RepositoryError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if !records.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.values().cloned().collect())
    }

    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .values()
            .filter(|record| record.status == SubmissionStatus::Pending)
            .take(limit)
            .cloned()
            .collect())
    }
}
