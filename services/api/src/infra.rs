use chrono::{Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use self_audit::audit::{
    generate_report, AnswerSheet, AuditError, AuditReport, ContentCatalog, Locale,
    ReportContext, ReportError, ScoringEngine,
};
use self_audit::config::AuditSettings;
use self_audit::error::AppError;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) audit: Arc<AuditService>,
}

/// Shared, read-only audit machinery: validated content plus the configured scorer.
#[derive(Debug)]
pub(crate) struct AuditService {
    catalog: ContentCatalog,
    engine: ScoringEngine,
    default_locale: Locale,
    organization: Option<String>,
}

impl AuditService {
    pub(crate) fn from_settings(settings: &AuditSettings) -> Result<Self, AppError> {
        let catalog = match &settings.content_path {
            Some(path) => {
                info!(path = %path.display(), "loading questionnaire content");
                ContentCatalog::load(path)?
            }
            None => ContentCatalog::standard()?,
        };

        Ok(Self {
            catalog,
            engine: ScoringEngine::new(settings.thresholds),
            default_locale: settings.default_locale,
            organization: settings.organization.clone(),
        })
    }

    pub(crate) fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub(crate) fn resolve_locale(&self, raw: Option<&str>) -> Result<Locale, AuditError> {
        match raw.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => Locale::from_code(code),
            None => Ok(self.default_locale),
        }
    }

    pub(crate) fn assemble(&self, sheet: &AnswerSheet) -> Result<AuditReport, AuditError> {
        let responses = sheet.apply(&self.catalog)?;
        AuditReport::assemble(&self.catalog, &responses, &self.engine)
    }

    pub(crate) fn workbook(
        &self,
        report: &AuditReport,
        today: Option<NaiveDate>,
        organization: Option<String>,
    ) -> Result<Vec<u8>, ReportError> {
        let context = ReportContext {
            generated_on: today.unwrap_or_else(|| Local::now().date_naive()),
            organization: organization.or_else(|| self.organization.clone()),
        };
        generate_report(report, &self.catalog, &context)
    }
}

pub(crate) fn read_answer_sheet(path: &Path) -> Result<AnswerSheet, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
