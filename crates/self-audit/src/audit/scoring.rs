use serde::Serialize;

use super::domain::{CategoryKey, PriorityTier};
use super::error::AuditError;
use super::responses::ResponseSet;
use super::thresholds::ScoreThresholds;

/// Per-category outcome; `percent` equals `score` because answers are already on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryResult {
    pub category: CategoryKey,
    pub score: f64,
    pub percent: f64,
    pub priority: PriorityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditScores {
    pub overall: f64,
    pub categories: Vec<CategoryResult>,
}

/// Stateless scorer that applies the shared threshold table to a response set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringEngine {
    thresholds: ScoreThresholds,
}

impl ScoringEngine {
    pub fn new(thresholds: ScoreThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ScoreThresholds {
        &self.thresholds
    }

    pub fn score_category(
        &self,
        responses: &ResponseSet,
        category: CategoryKey,
    ) -> Result<f64, AuditError> {
        let (total, count) = self.category_total(responses, category)?;
        Ok(f64::from(total) / count as f64)
    }

    /// Integer score sum and question count for a fully answered category.
    fn category_total(
        &self,
        responses: &ResponseSet,
        category: CategoryKey,
    ) -> Result<(u32, u64), AuditError> {
        let slots = responses.scores(category);
        let unanswered = responses.unanswered(category);
        if unanswered > 0 || slots.is_empty() {
            return Err(AuditError::IncompleteCategory {
                category,
                unanswered,
            });
        }

        let total = slots.iter().flatten().map(|score| u32::from(*score)).sum();
        Ok((total, slots.len() as u64))
    }

    pub fn category_result(
        &self,
        responses: &ResponseSet,
        category: CategoryKey,
    ) -> Result<CategoryResult, AuditError> {
        let score = self.score_category(responses, category)?;
        Ok(CategoryResult {
            category,
            score,
            percent: score,
            priority: self.thresholds.priority(score),
        })
    }

    /// Unweighted mean of the category means; question counts do not weight categories.
    pub fn score_overall(&self, responses: &ResponseSet) -> Result<f64, AuditError> {
        Ok(self.evaluate(responses)?.overall)
    }

    pub fn evaluate(&self, responses: &ResponseSet) -> Result<AuditScores, AuditError> {
        let incomplete = responses.incomplete_categories();
        if !incomplete.is_empty() {
            return Err(AuditError::IncompleteAudit { incomplete });
        }

        let categories = CategoryKey::ordered()
            .into_iter()
            .map(|category| self.category_result(responses, category))
            .collect::<Result<Vec<_>, _>>()?;

        let totals = CategoryKey::ordered()
            .into_iter()
            .map(|category| self.category_total(responses, category))
            .collect::<Result<Vec<_>, _>>()?;
        let overall = mean_of_means(&totals);

        Ok(AuditScores {
            overall,
            categories,
        })
    }

    pub fn priority(&self, percent: f64) -> PriorityTier {
        self.thresholds.priority(percent)
    }
}

/// Mean of `total / count` pairs, summed over a common denominator and divided
/// once, so an overall that lands exactly on a threshold compares equal to it.
fn mean_of_means(totals: &[(u32, u64)]) -> f64 {
    if totals.is_empty() {
        return 0.0;
    }
    let denominator = totals.iter().fold(1, |acc, &(_, count)| lcm(acc, count));
    let numerator: u64 = totals
        .iter()
        .map(|&(total, count)| u64::from(total) * (denominator / count))
        .sum();
    numerator as f64 / (denominator * totals.len() as u64) as f64
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}
