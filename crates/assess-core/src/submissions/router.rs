use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Submission, SubmissionId};
use super::monitor::{IngestMonitor, MonitorError};
use super::repository::{RepositoryError, SubmissionRepository};
use super::service::{SubmissionService, SubmissionServiceError};
use super::source::DocumentSource;
use crate::reports;

/// Shared handler state: the grading service plus the ingest monitor.
pub struct ApiContext<S, R> {
    pub service: Arc<SubmissionService<R>>,
    pub monitor: Arc<IngestMonitor<S, R>>,
}

impl<S, R> Clone for ApiContext<S, R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            monitor: Arc::clone(&self.monitor),
        }
    }
}

/// Build the submission API router around a context.
pub fn submission_router<S, R>(context: ApiContext<S, R>) -> Router
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/submissions",
            post(submit_handler::<S, R>).get(list_handler::<S, R>),
        )
        .route("/api/v1/submissions/:id", get(report_handler::<S, R>))
        .route(
            "/api/v1/submissions/:id/evaluate",
            post(evaluate_handler::<S, R>),
        )
        .route("/api/v1/stats/overview", get(overview_handler::<S, R>))
        .route("/api/v1/reports/class.csv", get(export_handler::<S, R>))
        .route("/api/v1/monitor/start", post(monitor_start_handler::<S, R>))
        .route("/api/v1/monitor/stop", post(monitor_stop_handler::<S, R>))
        .route("/api/v1/monitor/status", get(monitor_status_handler::<S, R>))
        .with_state(context)
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub filename: String,
    pub content: String,
}

pub async fn submit_handler<S, R>(
    State(context): State<ApiContext<S, R>>,
    Json(payload): Json<SubmitRequest>,
) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context
        .service
        .submit(Submission::new(payload.filename, payload.content))
    {
        Ok(record) => (
            StatusCode::CREATED,
            Json(reports::submission_view(&record)),
        )
            .into_response(),
        Err(err) => service_error_response(err),
    }
}

pub async fn list_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.service.list() {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(reports::submission_view).collect();
            Json(views).into_response()
        }
        Err(err) => service_error_response(err),
    }
}

pub async fn report_handler<S, R>(
    State(context): State<ApiContext<S, R>>,
    Path(id): Path<String>,
) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.service.get(&SubmissionId(id)) {
        Ok(record) => Json(reports::student_report(
            &record,
            context.service.engine().rubric(),
            context.service.pass_threshold(),
        ))
        .into_response(),
        Err(err) => service_error_response(err),
    }
}

pub async fn evaluate_handler<S, R>(
    State(context): State<ApiContext<S, R>>,
    Path(id): Path<String>,
) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.service.evaluate(&SubmissionId(id)) {
        Ok(record) => Json(reports::student_report(
            &record,
            context.service.engine().rubric(),
            context.service.pass_threshold(),
        ))
        .into_response(),
        Err(err) => service_error_response(err),
    }
}

pub async fn overview_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.service.list() {
        Ok(records) => Json(reports::class_overview(
            &records,
            context.service.pass_threshold(),
        ))
        .into_response(),
        Err(err) => service_error_response(err),
    }
}

pub async fn export_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    let records = match context.service.list() {
        Ok(records) => records,
        Err(err) => return service_error_response(err),
    };
    match reports::class_results_csv(&records) {
        Ok(rendered) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            rendered,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "csv export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "export failed" })),
            )
                .into_response()
        }
    }
}

pub async fn monitor_start_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.monitor.start() {
        Ok(status) => Json(status).into_response(),
        Err(err) => monitor_error_response(err),
    }
}

pub async fn monitor_stop_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    match context.monitor.stop() {
        Ok(status) => Json(status).into_response(),
        Err(err) => monitor_error_response(err),
    }
}

pub async fn monitor_status_handler<S, R>(State(context): State<ApiContext<S, R>>) -> Response
where
    S: DocumentSource + 'static,
    R: SubmissionRepository + 'static,
{
    Json(context.monitor.status()).into_response()
}

fn service_error_response(err: SubmissionServiceError) -> Response {
    let status = match &err {
        SubmissionServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SubmissionServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SubmissionServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

fn monitor_error_response(err: MonitorError) -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
