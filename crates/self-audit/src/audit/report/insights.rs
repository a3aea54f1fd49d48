use super::super::catalog::ContentCatalog;
use super::super::scoring::CategoryResult;
use super::summary::{question_text, AuditReport};
use super::views::{ActionItem, AuditInsights, CategoryActions, CategoryHighlight};

pub(crate) fn generate_insights(report: &AuditReport, catalog: &ContentCatalog) -> AuditInsights {
    let locale = report.locale;
    let categories = &report.scores.categories;

    // Ties resolve to the earlier category so output stays stable.
    let extremes = categories.split_first().map(|(first, rest)| {
        rest.iter().fold((first, first), |(strongest, weakest), result| {
            let strongest = if result.percent > strongest.percent {
                result
            } else {
                strongest
            };
            let weakest = if result.percent < weakest.percent {
                result
            } else {
                weakest
            };
            (strongest, weakest)
        })
    });

    let highlight = |result: &CategoryResult| CategoryHighlight {
        category: result.category,
        label: catalog.category_label(locale, result.category).to_string(),
        percent: result.percent,
    };

    let mut actions: Vec<CategoryActions> = Vec::new();
    for recommendation in &report.recommendations {
        let item = ActionItem {
            question_index: recommendation.question_index,
            question: question_text(
                catalog,
                locale,
                recommendation.category,
                recommendation.question_index,
            ),
            score: recommendation.score,
            recommendation: recommendation.text.clone(),
        };

        match actions.last_mut() {
            Some(group) if group.category == recommendation.category => group.items.push(item),
            _ => actions.push(CategoryActions {
                category: recommendation.category,
                label: catalog
                    .category_label(locale, recommendation.category)
                    .to_string(),
                items: vec![item],
            }),
        }
    }

    AuditInsights {
        strongest: extremes.map(|(strongest, _)| highlight(strongest)),
        weakest: extremes.map(|(_, weakest)| highlight(weakest)),
        spread: extremes
            .map(|(strongest, weakest)| strongest.percent - weakest.percent)
            .unwrap_or(0.0),
        questions_needing_attention: report.recommendations.len(),
        actions,
    }
}
