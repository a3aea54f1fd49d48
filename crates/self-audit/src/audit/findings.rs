use serde::Serialize;

use super::catalog::RecommendationTable;
use super::domain::{CategoryKey, PriorityTier};
use super::error::AuditError;
use super::responses::ResponseSet;
use super::scoring::CategoryResult;
use super::thresholds::ScoreThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Finding {
    pub category: CategoryKey,
    pub percent: f64,
    pub priority: PriorityTier,
}

/// Flagged categories, or the affirmation record when nothing falls below the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "findings", rename_all = "snake_case")]
pub enum Findings {
    Flagged(Vec<Finding>),
    AllClear,
}

impl Findings {
    pub fn flagged(&self) -> &[Finding] {
        match self {
            Findings::Flagged(findings) => findings,
            Findings::AllClear => &[],
        }
    }

    pub fn is_all_clear(&self) -> bool {
        matches!(self, Findings::AllClear)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub category: CategoryKey,
    pub question_index: usize,
    pub score: u8,
    pub text: String,
}

/// Flags categories under the improvement threshold, in category declaration order.
pub fn findings(results: &[CategoryResult], thresholds: &ScoreThresholds) -> Findings {
    let flagged: Vec<Finding> = results
        .iter()
        .filter(|result| thresholds.needs_attention(result.percent))
        .map(|result| Finding {
            category: result.category,
            percent: result.percent,
            priority: thresholds.priority(result.percent),
        })
        .collect();

    if flagged.is_empty() {
        Findings::AllClear
    } else {
        Findings::Flagged(flagged)
    }
}

/// Looks up remediation text for every answered question under the improvement threshold.
pub fn recommendations(
    responses: &ResponseSet,
    table: &RecommendationTable,
    thresholds: &ScoreThresholds,
) -> Result<Vec<Recommendation>, AuditError> {
    let locale = responses.locale();
    let mut recommendations = Vec::new();

    for category in CategoryKey::ordered() {
        for (question_index, slot) in responses.scores(category).iter().enumerate() {
            let Some(score) = *slot else {
                continue;
            };
            if !thresholds.needs_attention(f64::from(score)) {
                continue;
            }

            let text = table.lookup(locale, category, question_index).ok_or(
                AuditError::MissingRecommendation {
                    locale,
                    category,
                    question_index,
                },
            )?;

            recommendations.push(Recommendation {
                category,
                question_index,
                score,
                text: text.to_string(),
            });
        }
    }

    Ok(recommendations)
}
