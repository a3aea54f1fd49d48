use crate::cli::ServeArgs;
use crate::infra::{AppState, AuditService};
use crate::routes::audit_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use self_audit::config::AppConfig;
use self_audit::error::AppError;
use self_audit::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let audit = Arc::new(AuditService::from_settings(&config.audit)?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        audit,
    };

    let app = audit_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_locale = config.audit.default_locale.code(),
        "self-audit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
