use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::grading::{EvaluationEngine, Rubric};
use crate::submissions::monitor::IngestMonitor;
use crate::submissions::repository::{
    MemorySubmissionRepository, RepositoryError, SubmissionRecord, SubmissionRepository,
};
use crate::submissions::router::ApiContext;
use crate::submissions::service::SubmissionService;
use crate::submissions::source::{DocumentSource, IncomingDocument, SourceError};
use crate::submissions::SubmissionId;

pub(super) const PASS_THRESHOLD: f64 = 50.0;

/// Submission content that clears every gate and lands mid-band.
pub(super) const DECENT_CONTENT: &str = "\
The assignment asks for an algorithm that reads numbers and prints their sum.
If a value is negative the program must check it and stop reading input early.
Our flowchart begins at start, moves through a decision, and finishes at end.
Pseudocode for the solution:
start
    read number
    while number remains positive
        sum = sum + number
    print sum
end
A comment after each line explains what happens so another student can follow the logic easily.";

pub(super) fn engine() -> Arc<EvaluationEngine> {
    Arc::new(EvaluationEngine::new(
        Rubric::standard().expect("standard rubric builds"),
    ))
}

pub(super) fn build_service() -> (
    Arc<SubmissionService<MemorySubmissionRepository>>,
    Arc<MemorySubmissionRepository>,
) {
    let repository = Arc::new(MemorySubmissionRepository::new());
    let service = Arc::new(SubmissionService::new(
        repository.clone(),
        engine(),
        PASS_THRESHOLD,
    ));
    (service, repository)
}

pub(super) fn build_context() -> (
    ApiContext<StaticSource, MemorySubmissionRepository>,
    Arc<StaticSource>,
    Arc<MemorySubmissionRepository>,
) {
    let (service, repository) = build_service();
    let source = Arc::new(StaticSource::default());
    let monitor = Arc::new(IngestMonitor::new(source.clone(), service.clone()));
    (
        ApiContext { service, monitor },
        source,
        repository,
    )
}

pub(super) fn document(filename: &str) -> IncomingDocument {
    IncomingDocument {
        filename: filename.to_string(),
        content: DECENT_CONTENT.to_string(),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Source stub handing out whatever the test queued.
#[derive(Default)]
pub(super) struct StaticSource {
    queued: Mutex<Vec<IncomingDocument>>,
}

impl StaticSource {
    pub(super) fn queue(&self, document: IncomingDocument) {
        self.queued
            .lock()
            .expect("source mutex poisoned")
            .push(document);
    }
}

impl DocumentSource for StaticSource {
    fn fetch_new(&self) -> Result<Vec<IncomingDocument>, SourceError> {
        Ok(self
            .queued
            .lock()
            .expect("source mutex poisoned")
            .drain(..)
            .collect())
    }
}

pub(super) struct FailingSource;

impl DocumentSource for FailingSource {
    fn fetch_new(&self) -> Result<Vec<IncomingDocument>, SourceError> {
        Err(SourceError::Unavailable("inbox offline".to_string()))
    }
}

/// Repository that rejects the next update, then behaves normally.
#[derive(Default)]
pub(super) struct FlakyRepository {
    inner: MemorySubmissionRepository,
    fail_next_update: std::sync::atomic::AtomicBool,
}

impl FlakyRepository {
    pub(super) fn fail_next_update(&self) {
        self.fail_next_update
            .store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

impl SubmissionRepository for FlakyRepository {
    fn insert(&self, record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: SubmissionRecord) -> Result<(), RepositoryError> {
        if self
            .fail_next_update
            .swap(false, std::sync::atomic::Ordering::SeqCst)
        {
            return Err(RepositoryError::Unavailable("write failed".to_string()));
        }
        self.inner.update(record)
    }

    fn fetch(&self, id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        self.inner.list()
    }

    fn pending(&self, limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        self.inner.pending(limit)
    }
}

pub(super) struct UnavailableRepository;

impl SubmissionRepository for UnavailableRepository {
    fn insert(&self, _record: SubmissionRecord) -> Result<SubmissionRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SubmissionRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SubmissionId) -> Result<Option<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<SubmissionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
