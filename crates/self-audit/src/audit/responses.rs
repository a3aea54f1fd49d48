use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::ContentCatalog;
use super::domain::{CategoryKey, Locale};
use super::error::AuditError;
use super::keyed::PerCategory;

/// Caller-owned audit session: the active locale plus one score slot per question.
///
/// Slot vectors are sized from the catalog when the set is created and never
/// change length afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSet {
    locale: Locale,
    slots: PerCategory<Vec<Option<u8>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.answered as f64 / self.total as f64
        }
    }
}

impl ResponseSet {
    pub fn initialize(catalog: &ContentCatalog, locale: Locale) -> Self {
        let slots = PerCategory::from_fn(|category| vec![None; catalog.question_count(category)]);
        Self { locale, slots }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Moves the session to another language, discarding every recorded answer.
    ///
    /// Returns `false` without touching the slots when `locale` is already active.
    pub fn switch_locale(&mut self, catalog: &ContentCatalog, locale: Locale) -> bool {
        if locale == self.locale {
            return false;
        }
        *self = Self::initialize(catalog, locale);
        true
    }

    /// Records the score mapped to `description` and returns it.
    pub fn record(
        &mut self,
        catalog: &ContentCatalog,
        category: CategoryKey,
        question_index: usize,
        description: &str,
    ) -> Result<u8, AuditError> {
        let question = catalog
            .question(self.locale, category, question_index)
            .filter(|_| question_index < self.slots.get(category).len())
            .ok_or(AuditError::QuestionOutOfRange {
                category,
                question_index,
            })?;

        let score = catalog
            .score_for(self.locale, question.kind, description)
            .ok_or_else(|| AuditError::InvalidSelection {
                category,
                question_index,
                description: description.to_string(),
            })?;

        self.slots.get_mut(category)[question_index] = Some(score);
        Ok(score)
    }

    pub fn slot(&self, category: CategoryKey, question_index: usize) -> Option<u8> {
        self.slots
            .get(category)
            .get(question_index)
            .copied()
            .flatten()
    }

    pub fn scores(&self, category: CategoryKey) -> &[Option<u8>] {
        self.slots.get(category)
    }

    pub fn unanswered(&self, category: CategoryKey) -> usize {
        self.slots
            .get(category)
            .iter()
            .filter(|slot| slot.is_none())
            .count()
    }

    pub fn is_category_complete(&self, category: CategoryKey) -> bool {
        self.unanswered(category) == 0
    }

    pub fn is_complete(&self) -> bool {
        CategoryKey::ordered()
            .into_iter()
            .all(|category| self.is_category_complete(category))
    }

    pub fn incomplete_categories(&self) -> Vec<CategoryKey> {
        CategoryKey::ordered()
            .into_iter()
            .filter(|category| !self.is_category_complete(*category))
            .collect()
    }

    pub fn progress(&self) -> Progress {
        self.slots
            .iter()
            .fold(Progress { answered: 0, total: 0 }, |acc, (_, slots)| Progress {
                answered: acc.answered + slots.iter().filter(|slot| slot.is_some()).count(),
                total: acc.total + slots.len(),
            })
    }
}

/// Wire form of a questionnaire submission: option descriptions keyed by category.
///
/// `null` entries leave the matching slot unanswered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub locale: String,
    #[serde(default)]
    pub answers: BTreeMap<CategoryKey, Vec<Option<String>>>,
}

impl AnswerSheet {
    pub fn apply(&self, catalog: &ContentCatalog) -> Result<ResponseSet, AuditError> {
        let locale = Locale::from_code(&self.locale)?;
        let mut responses = ResponseSet::initialize(catalog, locale);

        for (category, answers) in &self.answers {
            for (index, answer) in answers.iter().enumerate() {
                if let Some(description) = answer {
                    responses.record(catalog, *category, index, description)?;
                }
            }
        }

        Ok(responses)
    }

    /// Builds the sheet that reproduces `responses` against `catalog`.
    pub fn from_responses(catalog: &ContentCatalog, responses: &ResponseSet) -> Self {
        let locale = responses.locale();
        let answers = CategoryKey::ordered()
            .into_iter()
            .map(|category| {
                let descriptions = responses
                    .scores(category)
                    .iter()
                    .enumerate()
                    .map(|(index, slot)| {
                        let score = (*slot)?;
                        let question = catalog.question(locale, category, index)?;
                        catalog
                            .options(locale, question.kind)
                            .iter()
                            .zip(super::domain::OPTION_SCORES)
                            .find(|(_, option_score)| *option_score == score)
                            .map(|(description, _)| description.clone())
                    })
                    .collect();
                (category, descriptions)
            })
            .collect();

        Self {
            locale: locale.code().to_string(),
            answers,
        }
    }
}
