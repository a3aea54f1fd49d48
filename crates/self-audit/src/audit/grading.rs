use serde::Serialize;

use super::catalog::ContentCatalog;
use super::domain::{GradeTier, Locale};
use super::thresholds::ScoreThresholds;

/// Classified overall score with its localized presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grade {
    pub tier: GradeTier,
    pub label: &'static str,
    pub narrative: String,
    pub severity: &'static str,
}

pub fn classify(score: f64, thresholds: &ScoreThresholds) -> GradeTier {
    thresholds.grade(score)
}

pub fn grade(
    score: f64,
    thresholds: &ScoreThresholds,
    catalog: &ContentCatalog,
    locale: Locale,
) -> Grade {
    let tier = classify(score, thresholds);
    Grade {
        tier,
        label: tier.label(locale),
        narrative: catalog.narrative(locale, tier).to_string(),
        severity: tier.severity_class(),
    }
}
