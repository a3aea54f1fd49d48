//! Questionnaire scoring and report assembly.
//!
//! Data flows one way: answers are recorded into a [`ResponseSet`], the
//! [`ScoringEngine`] turns a complete set into category and overall scores,
//! grading and findings classify those scores against the shared
//! [`ScoreThresholds`], and the report module lays everything out as a
//! single-sheet workbook.

pub mod catalog;
pub mod domain;
mod error;
pub mod findings;
pub mod grading;
pub mod keyed;
pub mod report;
pub mod responses;
pub mod scoring;
pub mod thresholds;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, ContentCatalog, RecommendationTable};
pub use domain::{
    Band, CategoryKey, GradeTier, Locale, PriorityTier, ResponseKind, OPTION_SCORES,
};
pub use error::AuditError;
pub use findings::{Finding, Findings, Recommendation};
pub use grading::Grade;
pub use report::{
    generate_report, questionnaire, render_workbook, report_mime, AuditReport, ReportContext,
    ReportDocument, ReportError, SectionKind, REPORT_FILENAME,
};
pub use responses::{AnswerSheet, Progress, ResponseSet};
pub use scoring::{AuditScores, CategoryResult, ScoringEngine};
pub use thresholds::ScoreThresholds;
