use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use self_audit::audit::report::views::{AuditInsights, AuditSummaryView, QuestionnaireView};
use self_audit::audit::{questionnaire, report_mime, AnswerSheet, AuditError, REPORT_FILENAME};
use self_audit::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionnaireQuery {
    #[serde(default)]
    pub(crate) locale: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuditSummaryResponse {
    #[serde(flatten)]
    pub(crate) summary: AuditSummaryView,
    pub(crate) insights: AuditInsights,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportRequest {
    #[serde(flatten)]
    pub(crate) sheet: AnswerSheet,
    #[serde(default)]
    pub(crate) organization: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn audit_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/audit/questionnaire", get(questionnaire_endpoint))
        .route("/api/v1/audit/summary", post(summary_endpoint))
        .route("/api/v1/audit/report", post(report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questionnaire_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<QuestionnaireQuery>,
) -> Result<Json<QuestionnaireView>, AppError> {
    let locale = state
        .audit
        .resolve_locale(query.locale.as_deref())
        .map_err(rejected)?;
    Ok(Json(questionnaire(state.audit.catalog(), locale)))
}

pub(crate) async fn summary_endpoint(
    Extension(state): Extension<AppState>,
    Json(sheet): Json<AnswerSheet>,
) -> Result<Json<AuditSummaryResponse>, AppError> {
    let report = state.audit.assemble(&sheet).map_err(rejected)?;
    let catalog = state.audit.catalog();

    Ok(Json(AuditSummaryResponse {
        summary: report.summary(catalog),
        insights: report.insights(catalog),
    }))
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ReportRequest {
        sheet,
        organization,
        today,
    } = request;

    let report = state.audit.assemble(&sheet).map_err(rejected)?;
    let bytes = state.audit.workbook(&report, today, organization)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report_mime().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}

fn rejected(err: AuditError) -> AppError {
    if err.is_recoverable() {
        warn!(error = %err, "audit submission rejected");
    }
    AppError::from(err)
}
