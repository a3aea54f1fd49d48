mod document;
mod insights;
mod summary;
pub mod views;
mod workbook;

pub use document::{
    Cell, ReportContext, ReportDocument, Row, Section, SectionKind, SHEET_NAME,
};
pub use summary::{questionnaire, AuditReport};
pub use workbook::render_workbook;

pub(crate) use insights::generate_insights;

use tracing::info;

use super::catalog::ContentCatalog;

/// File name offered to users when the workbook is downloaded.
pub const REPORT_FILENAME: &str = "audit_results.xlsx";

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub fn report_mime() -> mime::Mime {
    XLSX_MIME
        .parse()
        .unwrap_or(mime::APPLICATION_OCTET_STREAM)
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report failed structural integrity check: {0}")]
    StructuralIntegrity(String),
    #[error("unable to serialize workbook: {0}")]
    Serialization(#[from] rust_xlsxwriter::XlsxError),
    #[error("unable to write chart data: {0}")]
    Csv(#[from] csv::Error),
}

/// Lays out `report` and serializes it to workbook bytes.
pub fn generate_report(
    report: &AuditReport,
    catalog: &ContentCatalog,
    context: &ReportContext,
) -> Result<Vec<u8>, ReportError> {
    let document = ReportDocument::build(report, catalog, context);
    let buffer = render_workbook(&document)?;

    info!(
        locale = report.locale.code(),
        overall = report.scores.overall,
        grade = report.grade.severity,
        findings = report.findings.flagged().len(),
        recommendations = report.recommendations.len(),
        bytes = buffer.len(),
        "audit report generated"
    );

    Ok(buffer)
}
