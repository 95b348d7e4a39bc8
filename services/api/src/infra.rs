use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use assess_core::config::AppConfig;
use assess_core::error::AppError;
use assess_core::grading::{EvaluationEngine, Rubric};
use assess_core::submissions::{
    ApiContext, DirectorySource, IngestMonitor, MemorySubmissionRepository, SubmissionService,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type GradingContext = ApiContext<DirectorySource, MemorySubmissionRepository>;

/// Wire the repository, engine, source, and monitor into a handler context.
pub(crate) fn build_context(config: &AppConfig) -> Result<GradingContext, AppError> {
    let engine = Arc::new(EvaluationEngine::new(Rubric::standard()?));
    let repository = Arc::new(MemorySubmissionRepository::new());
    let service = Arc::new(SubmissionService::new(
        repository,
        engine,
        config.grading.pass_threshold,
    ));

    let source = Arc::new(DirectorySource::new(config.ingest.inbox_dir.clone()));
    let monitor = Arc::new(IngestMonitor::new(source, service.clone()));

    Ok(ApiContext { service, monitor })
}
