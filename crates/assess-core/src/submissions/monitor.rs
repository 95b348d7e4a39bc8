use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::repository::SubmissionRepository;
use super::service::{SubmissionService, SubmissionServiceError};
use super::source::{DocumentSource, SourceError};

/// Watches a [`DocumentSource`] and feeds new documents through the service.
///
/// All lifecycle state lives inside the monitor. Start and stop are explicit
/// transitions that fail loudly when repeated, and a poll against a stopped
/// monitor is a no-op rather than an error, so the driver loop and the HTTP
/// handlers cannot race each other into an inconsistent state.
pub struct IngestMonitor<S, R> {
    source: Arc<S>,
    service: Arc<SubmissionService<R>>,
    state: Mutex<MonitorState>,
}

#[derive(Debug, Clone)]
enum MonitorState {
    Idle,
    Running {
        started_at: DateTime<Utc>,
        polls: u64,
        ingested: u64,
        last_poll_at: Option<DateTime<Utc>>,
        last_error: Option<String>,
    },
}

/// Snapshot of the monitor lifecycle for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    pub polls: u64,
    pub ingested: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_poll_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Error raised by monitor lifecycle transitions.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("monitor already running")]
    AlreadyRunning,
    #[error("monitor not running")]
    NotRunning,
}

/// Error raised while ingesting during one poll.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Service(#[from] SubmissionServiceError),
}

impl<S, R> IngestMonitor<S, R>
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    pub fn new(source: Arc<S>, service: Arc<SubmissionService<R>>) -> Self {
        Self {
            source,
            service,
            state: Mutex::new(MonitorState::Idle),
        }
    }

    pub fn start(&self) -> Result<MonitorStatus, MonitorError> {
        let mut state = self.state.lock().expect("monitor mutex poisoned");
        if matches!(*state, MonitorState::Running { .. }) {
            return Err(MonitorError::AlreadyRunning);
        }
        *state = MonitorState::Running {
            started_at: Utc::now(),
            polls: 0,
            ingested: 0,
            last_poll_at: None,
            last_error: None,
        };
        tracing::info!("ingest monitor started");
        Ok(snapshot(&state))
    }

    pub fn stop(&self) -> Result<MonitorStatus, MonitorError> {
        let mut state = self.state.lock().expect("monitor mutex poisoned");
        if matches!(*state, MonitorState::Idle) {
            return Err(MonitorError::NotRunning);
        }
        let stopped = snapshot(&state);
        *state = MonitorState::Idle;
        tracing::info!(
            polls = stopped.polls,
            ingested = stopped.ingested,
            "ingest monitor stopped"
        );
        Ok(MonitorStatus {
            running: false,
            ..stopped
        })
    }

    pub fn status(&self) -> MonitorStatus {
        let state = self.state.lock().expect("monitor mutex poisoned");
        snapshot(&state)
    }

    /// Run one poll cycle: fetch new documents and grade each. Returns the
    /// number of documents ingested; zero without touching the source when
    /// the monitor is stopped.
    pub fn poll_once(&self) -> Result<usize, PollError> {
        {
            let state = self.state.lock().expect("monitor mutex poisoned");
            if matches!(*state, MonitorState::Idle) {
                return Ok(0);
            }
        }

        // The source and service are polled outside the state lock so a slow
        // inbox cannot block status queries.
        let outcome = self.ingest_batch();

        let mut state = self.state.lock().expect("monitor mutex poisoned");
        if let MonitorState::Running {
            polls,
            ingested,
            last_poll_at,
            last_error,
            ..
        } = &mut *state
        {
            *polls += 1;
            *last_poll_at = Some(Utc::now());
            match &outcome {
                Ok(count) => {
                    *ingested += *count as u64;
                    *last_error = None;
                }
                Err(err) => *last_error = Some(err.to_string()),
            }
        }

        outcome
    }

    fn ingest_batch(&self) -> Result<usize, PollError> {
        let documents = self.source.fetch_new()?;
        let mut count = 0;
        for document in documents {
            let record = self.service.ingest(document)?;
            tracing::debug!(id = %record.id.0, "document ingested");
            count += 1;
        }
        Ok(count)
    }
}

fn snapshot(state: &MonitorState) -> MonitorStatus {
    match state {
        MonitorState::Idle => MonitorStatus {
            running: false,
            started_at: None,
            polls: 0,
            ingested: 0,
            last_poll_at: None,
            last_error: None,
        },
        MonitorState::Running {
            started_at,
            polls,
            ingested,
            last_poll_at,
            last_error,
        } => MonitorStatus {
            running: true,
            started_at: Some(*started_at),
            polls: *polls,
            ingested: *ingested,
            last_poll_at: *last_poll_at,
            last_error: last_error.clone(),
        },
    }
}
