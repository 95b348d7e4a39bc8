//! Submission intake: identity parsing, storage, the grading workflow, the
//! folder watcher, and the HTTP surface.

pub mod domain;
pub mod identity;
pub mod monitor;
pub mod repository;
pub mod router;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use domain::{StudentIdentity, Submission, SubmissionId, SubmissionStatus};
pub use monitor::{IngestMonitor, MonitorError, MonitorStatus};
pub use repository::{MemorySubmissionRepository, RepositoryError, SubmissionRecord, SubmissionRepository};
pub use router::{submission_router, ApiContext};
pub use service::{SubmissionService, SubmissionServiceError};
pub use source::{DirectorySource, DocumentSource, IncomingDocument, SourceError};
