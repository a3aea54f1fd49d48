use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::domain::{CategoryKey, GradeTier, Locale, ResponseKind, OPTION_SCORES};
use super::keyed::{PerCategory, PerKind, PerLocale};

const STANDARD_CONTENT: &str = include_str!("../../content/standard.json");

/// Static questionnaire content: questions, option scales, narratives and report copy.
///
/// Only obtainable through the validating constructors, so holders can index
/// any locale/category/question shape without re-checking it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentCatalog {
    locales: PerLocale<LocaleContent>,
    recommendations: RecommendationTable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleContent {
    pub categories: PerCategory<CategoryContent>,
    pub response_options: PerKind<[String; 5]>,
    pub grade_narratives: GradeNarratives,
    pub report: ReportText,
    pub contact: ContactBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryContent {
    pub label: String,
    pub questions: Vec<QuestionContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionContent {
    pub text: String,
    pub kind: ResponseKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradeNarratives {
    pub excellent: String,
    pub good: String,
    pub needs_improvement: String,
    pub critical: String,
}

impl GradeNarratives {
    pub fn get(&self, tier: GradeTier) -> &str {
        match tier {
            GradeTier::Excellent => &self.excellent,
            GradeTier::Good => &self.good,
            GradeTier::NeedsImprovement => &self.needs_improvement,
            GradeTier::Critical => &self.critical,
        }
    }
}

/// Localized copy used by the report document: section titles, headers and fixed phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportText {
    pub title: String,
    pub field_header: String,
    pub value_header: String,
    pub generated_label: String,
    pub language_label: String,
    pub organization_label: String,
    pub summary_title: String,
    pub overall_score_label: String,
    pub grade_label: String,
    pub assessment_label: String,
    pub results_title: String,
    pub category_header: String,
    pub score_header: String,
    pub percent_header: String,
    pub priority_header: String,
    pub findings_title: String,
    pub rationale_header: String,
    /// The rationale, affirmation and no-recommendation lines may carry a
    /// `{threshold}` placeholder, filled with the bound in force when rendered.
    pub high_priority_rationale: String,
    pub medium_priority_rationale: String,
    pub affirmation: String,
    pub insights_title: String,
    pub question_header: String,
    pub recommendation_header: String,
    pub no_recommendations: String,
    pub chart_title: String,
    pub contact_title: String,
}

impl ReportText {
    fn entries(&self) -> [(&'static str, &str); 26] {
        [
            ("title", self.title.as_str()),
            ("field_header", self.field_header.as_str()),
            ("value_header", self.value_header.as_str()),
            ("generated_label", self.generated_label.as_str()),
            ("language_label", self.language_label.as_str()),
            ("organization_label", self.organization_label.as_str()),
            ("summary_title", self.summary_title.as_str()),
            ("overall_score_label", self.overall_score_label.as_str()),
            ("grade_label", self.grade_label.as_str()),
            ("assessment_label", self.assessment_label.as_str()),
            ("results_title", self.results_title.as_str()),
            ("category_header", self.category_header.as_str()),
            ("score_header", self.score_header.as_str()),
            ("percent_header", self.percent_header.as_str()),
            ("priority_header", self.priority_header.as_str()),
            ("findings_title", self.findings_title.as_str()),
            ("rationale_header", self.rationale_header.as_str()),
            ("high_priority_rationale", self.high_priority_rationale.as_str()),
            ("medium_priority_rationale", self.medium_priority_rationale.as_str()),
            ("affirmation", self.affirmation.as_str()),
            ("insights_title", self.insights_title.as_str()),
            ("question_header", self.question_header.as_str()),
            ("recommendation_header", self.recommendation_header.as_str()),
            ("no_recommendations", self.no_recommendations.as_str()),
            ("chart_title", self.chart_title.as_str()),
            ("contact_title", self.contact_title.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactBlock {
    pub heading: String,
    pub lines: Vec<String>,
}

/// Remediation text for every (category, question index) pair, per locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationTable(PerLocale<PerCategory<Vec<String>>>);

impl RecommendationTable {
    pub fn new(entries: PerLocale<PerCategory<Vec<String>>>) -> Self {
        Self(entries)
    }

    pub fn lookup(&self, locale: Locale, category: CategoryKey, index: usize) -> Option<&str> {
        self.0
            .get(locale)
            .get(category)
            .get(index)
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read content file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not valid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{category:?} has no questions in {locale:?}")]
    EmptyCategory {
        locale: Locale,
        category: CategoryKey,
    },
    #[error("{category:?} has {found} question(s) in {locale:?} but {expected} in English")]
    QuestionShapeMismatch {
        locale: Locale,
        category: CategoryKey,
        expected: usize,
        found: usize,
    },
    #[error("{category:?} question {question_index} changes response kind in {locale:?}")]
    QuestionKindMismatch {
        locale: Locale,
        category: CategoryKey,
        question_index: usize,
    },
    #[error("option '{description}' appears twice in the {kind:?} scale ({locale:?})")]
    DuplicateOption {
        locale: Locale,
        kind: ResponseKind,
        description: String,
    },
    #[error("option '{description}' in the {kind:?} scale ({locale:?}) has surrounding whitespace")]
    PaddedOption {
        locale: Locale,
        kind: ResponseKind,
        description: String,
    },
    #[error("blank text for {field} ({locale:?})")]
    BlankText { locale: Locale, field: String },
    #[error("no recommendation for {category:?} question {question_index} ({locale:?})")]
    MissingRecommendation {
        locale: Locale,
        category: CategoryKey,
        question_index: usize,
    },
}

impl ContentCatalog {
    /// Bilingual workplace questionnaire shipped with the crate.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_json_str(STANDARD_CONTENT)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn content(&self, locale: Locale) -> &LocaleContent {
        self.locales.get(locale)
    }

    pub fn recommendations(&self) -> &RecommendationTable {
        &self.recommendations
    }

    pub fn category_label(&self, locale: Locale, category: CategoryKey) -> &str {
        &self.content(locale).categories.get(category).label
    }

    /// Reverse projection for callers that post back display labels.
    pub fn category_for_label(&self, locale: Locale, label: &str) -> Option<CategoryKey> {
        let label = label.trim();
        self.content(locale)
            .categories
            .iter()
            .find(|(_, content)| content.label == label)
            .map(|(category, _)| category)
    }

    pub fn question_count(&self, category: CategoryKey) -> usize {
        self.content(Locale::En).categories.get(category).questions.len()
    }

    pub fn question(
        &self,
        locale: Locale,
        category: CategoryKey,
        index: usize,
    ) -> Option<&QuestionContent> {
        self.content(locale)
            .categories
            .get(category)
            .questions
            .get(index)
    }

    pub fn options(&self, locale: Locale, kind: ResponseKind) -> &[String; 5] {
        self.content(locale).response_options.get(kind)
    }

    /// Maps an option description back to its score on the five point scale.
    pub fn score_for(&self, locale: Locale, kind: ResponseKind, description: &str) -> Option<u8> {
        let description = description.trim();
        self.options(locale, kind)
            .iter()
            .position(|option| option == description)
            .map(|position| OPTION_SCORES[position])
    }

    pub fn narrative(&self, locale: Locale, tier: GradeTier) -> &str {
        self.content(locale).grade_narratives.get(tier)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let reference = self.content(Locale::En);

        for (locale, content) in self.locales.iter() {
            for (category, category_content) in content.categories.iter() {
                require_text(locale, category.key(), &category_content.label)?;

                if category_content.questions.is_empty() {
                    return Err(CatalogError::EmptyCategory { locale, category });
                }

                let expected = &reference.categories.get(category).questions;
                if category_content.questions.len() != expected.len() {
                    return Err(CatalogError::QuestionShapeMismatch {
                        locale,
                        category,
                        expected: expected.len(),
                        found: category_content.questions.len(),
                    });
                }

                for (index, (question, baseline)) in
                    category_content.questions.iter().zip(expected).enumerate()
                {
                    require_text(
                        locale,
                        &format!("{} question {index}", category.key()),
                        &question.text,
                    )?;
                    if question.kind != baseline.kind {
                        return Err(CatalogError::QuestionKindMismatch {
                            locale,
                            category,
                            question_index: index,
                        });
                    }
                    if self.recommendations.lookup(locale, category, index).is_none() {
                        return Err(CatalogError::MissingRecommendation {
                            locale,
                            category,
                            question_index: index,
                        });
                    }
                }
            }

            for (kind, options) in content.response_options.iter() {
                let mut seen = HashSet::new();
                for option in options {
                    require_text(locale, &format!("{kind:?} option"), option)?;
                    // Submissions are trimmed before matching.
                    if option.trim() != option {
                        return Err(CatalogError::PaddedOption {
                            locale,
                            kind,
                            description: option.clone(),
                        });
                    }
                    if !seen.insert(option.as_str()) {
                        return Err(CatalogError::DuplicateOption {
                            locale,
                            kind,
                            description: option.clone(),
                        });
                    }
                }
            }

            for tier in GradeTier::ordered() {
                require_text(
                    locale,
                    &format!("{} narrative", tier.severity_class()),
                    content.grade_narratives.get(tier),
                )?;
            }

            for (field, value) in content.report.entries() {
                require_text(locale, field, value)?;
            }
            require_text(locale, "contact heading", &content.contact.heading)?;
        }

        Ok(())
    }
}

fn require_text(locale: Locale, field: &str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::BlankText {
            locale,
            field: field.to_string(),
        });
    }
    Ok(())
}
