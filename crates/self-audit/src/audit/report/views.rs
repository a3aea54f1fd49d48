use serde::Serialize;

use super::super::domain::{Band, CategoryKey, Locale, PriorityTier, ResponseKind};
use super::super::grading::Grade;

/// One decimal place with a percent suffix, as shown in every report surface.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResultView {
    pub category: CategoryKey,
    pub label: String,
    pub score: f64,
    pub percent: f64,
    pub percent_display: String,
    pub priority: PriorityTier,
    pub priority_label: &'static str,
    pub band: Band,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindingView {
    pub category: CategoryKey,
    pub label: String,
    pub percent: f64,
    pub percent_display: String,
    pub priority: PriorityTier,
    pub priority_label: &'static str,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindingsView {
    pub all_clear: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affirmation: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FindingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub category: CategoryKey,
    pub category_label: String,
    pub question_index: usize,
    pub question: String,
    pub score: u8,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPoint {
    pub category: CategoryKey,
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditSummaryView {
    pub locale: Locale,
    pub overall_score: f64,
    pub overall_display: String,
    pub grade: Grade,
    pub categories: Vec<CategoryResultView>,
    pub findings: FindingsView,
    pub recommendations: Vec<RecommendationView>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub text: String,
    pub kind: ResponseKind,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireCategoryView {
    pub category: CategoryKey,
    pub label: String,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub locale: Locale,
    pub categories: Vec<QuestionnaireCategoryView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionItem {
    pub question_index: usize,
    pub question: String,
    pub score: u8,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryActions {
    pub category: CategoryKey,
    pub label: String,
    pub items: Vec<ActionItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryHighlight {
    pub category: CategoryKey,
    pub label: String,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest: Option<CategoryHighlight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weakest: Option<CategoryHighlight>,
    /// Gap between the strongest and weakest category, in percentage points.
    pub spread: f64,
    pub questions_needing_attention: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<CategoryActions>,
}
