use serde::Serialize;

use super::super::catalog::ContentCatalog;
use super::super::domain::{CategoryKey, Locale, PriorityTier};
use super::super::error::AuditError;
use super::super::findings::{self, Findings, Recommendation};
use super::super::grading::{self, Grade};
use super::super::responses::ResponseSet;
use super::super::scoring::{AuditScores, ScoringEngine};
use super::super::thresholds::ScoreThresholds;
use super::views::{
    format_percent, AuditInsights, AuditSummaryView, CategoryResultView, ChartPoint, FindingView,
    FindingsView, QuestionView, QuestionnaireCategoryView, QuestionnaireView, RecommendationView,
};

/// Everything derived from one completed response set.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub locale: Locale,
    pub thresholds: ScoreThresholds,
    pub scores: AuditScores,
    pub grade: Grade,
    pub findings: Findings,
    pub recommendations: Vec<Recommendation>,
}

impl AuditReport {
    pub fn assemble(
        catalog: &ContentCatalog,
        responses: &ResponseSet,
        engine: &ScoringEngine,
    ) -> Result<Self, AuditError> {
        let thresholds = *engine.thresholds();
        let locale = responses.locale();
        let scores = engine.evaluate(responses)?;
        let grade = grading::grade(scores.overall, &thresholds, catalog, locale);
        let findings = findings::findings(&scores.categories, &thresholds);
        let recommendations =
            findings::recommendations(responses, catalog.recommendations(), &thresholds)?;

        Ok(Self {
            locale,
            thresholds,
            scores,
            grade,
            findings,
            recommendations,
        })
    }

    pub fn summary(&self, catalog: &ContentCatalog) -> AuditSummaryView {
        let locale = self.locale;
        let text = &catalog.content(locale).report;

        let categories = self
            .scores
            .categories
            .iter()
            .map(|result| CategoryResultView {
                category: result.category,
                label: catalog.category_label(locale, result.category).to_string(),
                score: result.score,
                percent: result.percent,
                percent_display: format_percent(result.percent),
                priority: result.priority,
                priority_label: result.priority.label(locale),
                band: self.thresholds.band(result.percent),
            })
            .collect();

        let findings = match &self.findings {
            Findings::AllClear => FindingsView {
                all_clear: true,
                affirmation: Some(with_threshold(
                    &text.affirmation,
                    self.thresholds.improvement_below,
                )),
                items: Vec::new(),
            },
            Findings::Flagged(flagged) => FindingsView {
                all_clear: false,
                affirmation: None,
                items: flagged
                    .iter()
                    .map(|finding| FindingView {
                        category: finding.category,
                        label: catalog.category_label(locale, finding.category).to_string(),
                        percent: finding.percent,
                        percent_display: format_percent(finding.percent),
                        priority: finding.priority,
                        priority_label: finding.priority.label(locale),
                        rationale: rationale(
                            catalog,
                            locale,
                            finding.priority,
                            &self.thresholds,
                        ),
                    })
                    .collect(),
            },
        };

        let recommendations = self
            .recommendations
            .iter()
            .map(|recommendation| RecommendationView {
                category: recommendation.category,
                category_label: catalog
                    .category_label(locale, recommendation.category)
                    .to_string(),
                question_index: recommendation.question_index,
                question: question_text(
                    catalog,
                    locale,
                    recommendation.category,
                    recommendation.question_index,
                ),
                score: recommendation.score,
                recommendation: recommendation.text.clone(),
            })
            .collect();

        let chart = self
            .scores
            .categories
            .iter()
            .map(|result| ChartPoint {
                category: result.category,
                label: catalog.category_label(locale, result.category).to_string(),
                percent: result.percent,
            })
            .collect();

        AuditSummaryView {
            locale,
            overall_score: self.scores.overall,
            overall_display: format_percent(self.scores.overall),
            grade: self.grade.clone(),
            categories,
            findings,
            recommendations,
            chart,
        }
    }

    pub fn insights(&self, catalog: &ContentCatalog) -> AuditInsights {
        super::generate_insights(self, catalog)
    }
}

pub fn questionnaire(catalog: &ContentCatalog, locale: Locale) -> QuestionnaireView {
    let categories = catalog
        .content(locale)
        .categories
        .iter()
        .map(|(category, content)| QuestionnaireCategoryView {
            category,
            label: content.label.clone(),
            questions: content
                .questions
                .iter()
                .enumerate()
                .map(|(index, question)| QuestionView {
                    index,
                    text: question.text.clone(),
                    kind: question.kind,
                    options: catalog.options(locale, question.kind).to_vec(),
                })
                .collect(),
        })
        .collect();

    QuestionnaireView { locale, categories }
}

pub(crate) fn rationale(
    catalog: &ContentCatalog,
    locale: Locale,
    priority: PriorityTier,
    thresholds: &ScoreThresholds,
) -> String {
    let text = &catalog.content(locale).report;
    match priority {
        PriorityTier::High => {
            with_threshold(&text.high_priority_rationale, thresholds.critical_below)
        }
        PriorityTier::Medium | PriorityTier::Low => {
            with_threshold(&text.medium_priority_rationale, thresholds.improvement_below)
        }
    }
}

/// Fills the `{threshold}` placeholder in report copy; `70.0` renders as `70`.
pub(crate) fn with_threshold(template: &str, bound: f64) -> String {
    template.replace("{threshold}", &bound.to_string())
}

pub(crate) fn question_text(
    catalog: &ContentCatalog,
    locale: Locale,
    category: CategoryKey,
    index: usize,
) -> String {
    catalog
        .question(locale, category, index)
        .map(|question| question.text.clone())
        .unwrap_or_default()
}
