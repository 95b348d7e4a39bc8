use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use assess_core::config::AppConfig;
use assess_core::error::AppError;
use assess_core::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{build_context, AppState};
use crate::routes::with_submission_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let context = build_context(&config)?;
    spawn_monitor_driver(&context, config.ingest.poll_interval_secs);

    let app = with_submission_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "autoassess grading service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Ticks the ingest monitor on the configured interval. Polls are no-ops
/// until the monitor is started through the API, so the driver can run for
/// the whole process lifetime.
fn spawn_monitor_driver(context: &crate::infra::GradingContext, poll_interval_secs: u64) {
    let monitor = Arc::clone(&context.monitor);
    let interval = Duration::from_secs(poll_interval_secs.max(1));

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match monitor.poll_once() {
                Ok(0) => {}
                Ok(count) => info!(count, "ingested submissions from inbox"),
                Err(err) => tracing::warn!(error = %err, "ingest poll failed"),
            }
        }
    });
}
