use super::common::*;
use crate::submissions::domain::{Submission, SubmissionStatus};
use crate::submissions::repository::{RepositoryError, SubmissionRepository};
use crate::submissions::service::SubmissionServiceError;
use crate::submissions::SubmissionId;

#[test]
fn submit_stores_a_pending_record() {
    let (service, repository) = build_service();

    let record = service
        .submit(Submission::new("JaneDoe_AB123456_hw1.txt", DECENT_CONTENT))
        .expect("submit succeeds");

    assert!(record.id.0.starts_with("sub-"));
    assert_eq!(record.status, SubmissionStatus::Pending);
    assert!(record.assessment.is_none());
    assert!(record.evaluated_at.is_none());
    assert_eq!(
        record.submission.identity.student_id.as_deref(),
        Some("AB123456")
    );

    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(stored.status, SubmissionStatus::Pending);
}

#[test]
fn evaluate_persists_the_assessment() {
    let (service, repository) = build_service();
    let record = service
        .submit(Submission::new("work.txt", DECENT_CONTENT))
        .expect("submit succeeds");

    let graded = service.evaluate(&record.id).expect("evaluate succeeds");

    assert_eq!(graded.status, SubmissionStatus::Evaluated);
    assert!(graded.evaluated_at.is_some());
    let assessment = graded.assessment.expect("assessment present");
    assert_eq!(assessment.total_score, 79.56);
    assert_eq!(assessment.grade, "B+");

    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(stored.status, SubmissionStatus::Evaluated);
    assert!(stored.assessment.is_some());
}

#[test]
fn evaluate_unknown_id_is_not_found() {
    let (service, _) = build_service();

    match service.evaluate(&SubmissionId("sub-999999".to_string())) {
        Err(SubmissionServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn ingest_accepts_and_grades_in_one_step() {
    let (service, _) = build_service();

    let record = service
        .ingest(document("20231042-Lee-hw2.txt"))
        .expect("ingest succeeds");

    assert_eq!(record.status, SubmissionStatus::Evaluated);
    assert!(record.assessment.is_some());
    assert_eq!(
        record.submission.identity.student_id.as_deref(),
        Some("20231042")
    );
    assert_eq!(
        record.submission.identity.student_name.as_deref(),
        Some("Lee Hw2")
    );
}

#[test]
fn pending_lists_only_ungraded_records() {
    let (service, _) = build_service();

    let first = service
        .submit(Submission::new("one.txt", DECENT_CONTENT))
        .expect("submit succeeds");
    let second = service
        .submit(Submission::new("two.txt", DECENT_CONTENT))
        .expect("submit succeeds");
    service.evaluate(&first.id).expect("evaluate succeeds");

    let pending = service.pending(10).expect("pending succeeds");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    assert_eq!(service.list().expect("list succeeds").len(), 2);
}

#[test]
fn persistence_fault_during_evaluation_marks_the_record_failed() {
    let repository = std::sync::Arc::new(FlakyRepository::default());
    let service = crate::submissions::service::SubmissionService::new(
        repository.clone(),
        engine(),
        PASS_THRESHOLD,
    );
    let record = service
        .submit(Submission::new("work.txt", DECENT_CONTENT))
        .expect("submit succeeds");

    repository.fail_next_update();
    match service.evaluate(&record.id) {
        Err(SubmissionServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable, got {other:?}"),
    }

    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record stored");
    assert_eq!(stored.status, SubmissionStatus::Failed);
    assert!(stored.assessment.is_none());
    assert!(stored.evaluated_at.is_none());
}

#[test]
fn repeated_evaluation_overwrites_the_previous_assessment() {
    let (service, _) = build_service();
    let record = service
        .submit(Submission::new("work.txt", DECENT_CONTENT))
        .expect("submit succeeds");

    let first = service.evaluate(&record.id).expect("evaluate succeeds");
    let second = service.evaluate(&record.id).expect("evaluate succeeds");

    assert_eq!(
        first.assessment.expect("assessment").total_score,
        second.assessment.expect("assessment").total_score
    );
}
