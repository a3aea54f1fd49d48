use chrono::NaiveDate;

use crate::audit::{
    AuditReport, CategoryKey, ContentCatalog, Locale, ReportContext, ResponseSet, ScoringEngine,
};

pub(super) fn catalog() -> ContentCatalog {
    ContentCatalog::standard().expect("standard content validates")
}

/// Records the option at `position` (0 = lowest score) for one question.
pub(super) fn answer(
    responses: &mut ResponseSet,
    catalog: &ContentCatalog,
    category: CategoryKey,
    question_index: usize,
    position: usize,
) -> u8 {
    let locale = responses.locale();
    let kind = catalog
        .question(locale, category, question_index)
        .expect("question exists")
        .kind;
    let description = catalog.options(locale, kind)[position].clone();
    responses
        .record(catalog, category, question_index, &description)
        .expect("option is valid")
}

/// Answers every question with the option position chosen by `position_for`.
pub(super) fn answered_with(
    catalog: &ContentCatalog,
    locale: Locale,
    mut position_for: impl FnMut(CategoryKey, usize) -> usize,
) -> ResponseSet {
    let mut responses = ResponseSet::initialize(catalog, locale);
    for category in CategoryKey::ordered() {
        for index in 0..catalog.question_count(category) {
            let position = position_for(category, index);
            answer(&mut responses, catalog, category, index, position);
        }
    }
    responses
}

pub(super) fn uniform(catalog: &ContentCatalog, locale: Locale, position: usize) -> ResponseSet {
    answered_with(catalog, locale, |_, _| position)
}

pub(super) fn report_for(catalog: &ContentCatalog, responses: &ResponseSet) -> AuditReport {
    AuditReport::assemble(catalog, responses, &ScoringEngine::default())
        .expect("complete responses assemble")
}

pub(super) fn context() -> ReportContext {
    ReportContext {
        generated_on: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        organization: Some("Northwind Traders".to_string()),
    }
}
