use super::domain::{CategoryKey, Locale};

/// Failures raised while recording, scoring or explaining an audit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuditError {
    #[error("'{description}' is not an option for {category:?} question {question_index}")]
    InvalidSelection {
        category: CategoryKey,
        question_index: usize,
        description: String,
    },
    #[error("{category:?} has no question at index {question_index}")]
    QuestionOutOfRange {
        category: CategoryKey,
        question_index: usize,
    },
    #[error("please complete {category:?}: {unanswered} question(s) unanswered")]
    IncompleteCategory {
        category: CategoryKey,
        unanswered: usize,
    },
    #[error("please complete every category before scoring; incomplete: {}", format_categories(.incomplete))]
    IncompleteAudit { incomplete: Vec<CategoryKey> },
    #[error("no recommendation configured for {category:?} question {question_index} ({locale:?})")]
    MissingRecommendation {
        locale: Locale,
        category: CategoryKey,
        question_index: usize,
    },
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

impl AuditError {
    /// True for errors caused by user input that the caller should re-prompt on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuditError::MissingRecommendation { .. })
    }
}

fn format_categories(categories: &[CategoryKey]) -> String {
    categories
        .iter()
        .map(|category| category.key())
        .collect::<Vec<_>>()
        .join(", ")
}
