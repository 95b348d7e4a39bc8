use std::sync::Arc;

use super::common::*;
use crate::submissions::monitor::{IngestMonitor, MonitorError, PollError};
use crate::submissions::source::SourceError;
use crate::submissions::SubmissionStatus;

#[test]
fn poll_before_start_is_a_noop() {
    let (service, _) = build_service();
    let monitor = IngestMonitor::new(Arc::new(FailingSource), service);

    // The source would fail if touched; an idle monitor never polls it.
    assert_eq!(monitor.poll_once().expect("idle poll succeeds"), 0);
    assert!(!monitor.status().running);
}

#[test]
fn lifecycle_transitions_fail_loudly_when_repeated() {
    let (service, _) = build_service();
    let monitor = IngestMonitor::new(Arc::new(StaticSource::default()), service);

    assert!(matches!(monitor.stop(), Err(MonitorError::NotRunning)));

    let started = monitor.start().expect("start succeeds");
    assert!(started.running);
    assert!(matches!(monitor.start(), Err(MonitorError::AlreadyRunning)));

    let stopped = monitor.stop().expect("stop succeeds");
    assert!(!stopped.running);
    assert!(matches!(monitor.stop(), Err(MonitorError::NotRunning)));
}

#[test]
fn poll_ingests_queued_documents() {
    let (service, _) = build_service();
    let source = Arc::new(StaticSource::default());
    source.queue(document("a_20231042.txt"));
    source.queue(document("b_20231043.txt"));

    let monitor = IngestMonitor::new(source.clone(), service.clone());
    monitor.start().expect("start succeeds");

    assert_eq!(monitor.poll_once().expect("poll succeeds"), 2);

    let status = monitor.status();
    assert_eq!(status.polls, 1);
    assert_eq!(status.ingested, 2);
    assert!(status.last_error.is_none());
    assert!(status.last_poll_at.is_some());

    let records = service.list().expect("list succeeds");
    assert_eq!(records.len(), 2);
    assert!(records
        .iter()
        .all(|record| record.status == SubmissionStatus::Evaluated));

    // A second poll finds nothing new.
    assert_eq!(monitor.poll_once().expect("poll succeeds"), 0);
    assert_eq!(monitor.status().polls, 2);
}

#[test]
fn source_failure_is_recorded_in_status() {
    let (service, _) = build_service();
    let monitor = IngestMonitor::new(Arc::new(FailingSource), service);
    monitor.start().expect("start succeeds");

    match monitor.poll_once() {
        Err(PollError::Source(SourceError::Unavailable(message))) => {
            assert!(message.contains("inbox offline"));
        }
        other => panic!("expected source error, got {other:?}"),
    }

    let status = monitor.status();
    assert_eq!(status.polls, 1);
    assert_eq!(status.ingested, 0);
    assert!(status
        .last_error
        .as_deref()
        .unwrap_or_default()
        .contains("inbox offline"));
}

#[test]
fn stop_resets_counters_for_the_next_run() {
    let (service, _) = build_service();
    let source = Arc::new(StaticSource::default());
    source.queue(document("a_20231042.txt"));

    let monitor = IngestMonitor::new(source, service);
    monitor.start().expect("start succeeds");
    monitor.poll_once().expect("poll succeeds");
    monitor.stop().expect("stop succeeds");

    let restarted = monitor.start().expect("restart succeeds");
    assert_eq!(restarted.polls, 0);
    assert_eq!(restarted.ingested, 0);
}
