use super::common::*;
use crate::audit::report::{Cell, ReportContext, ReportDocument, SectionKind};
use crate::audit::{
    render_workbook, Band, CategoryKey, Findings, Locale, ReportError, ScoringEngine,
};

#[test]
fn sections_follow_the_canonical_order() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 2));

    let document = ReportDocument::build(&report, &catalog, &context());

    let kinds: Vec<_> = document.sections.iter().map(|section| section.kind).collect();
    assert_eq!(kinds, SectionKind::ordered().to_vec());
    assert_eq!(document.sheet_name, "Audit");
    document.validate().expect("built document is valid");
}

#[test]
fn metadata_lists_date_language_and_organization() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::Es, 4));

    let document = ReportDocument::build(&report, &catalog, &context());
    let title = document.section(SectionKind::Title).expect("title section");

    assert_eq!(title.title, "Resultados de la autoevaluación del entorno laboral");
    let values: Vec<_> = title.rows.iter().map(|row| row.cells[1].display()).collect();
    assert_eq!(values, vec!["2025-03-14", "Español", "Northwind Traders"]);
}

#[test]
fn blank_organization_is_omitted() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 4));
    let context = ReportContext {
        organization: Some("   ".to_string()),
        ..context()
    };

    let document = ReportDocument::build(&report, &catalog, &context);

    let title = document.section(SectionKind::Title).expect("title section");
    assert_eq!(title.rows.len(), 2);
}

#[test]
fn result_rows_are_banded_by_priority() {
    let catalog = catalog();
    let responses = answered_with(&catalog, Locale::En, |category, _| match category {
        CategoryKey::Leadership => 0,
        CategoryKey::EmployeeEmpowerment => 2,
        _ => 3,
    });
    let report = report_for(&catalog, &responses);

    let document = ReportDocument::build(&report, &catalog, &context());
    let results = document.section(SectionKind::Results).expect("results section");

    let bands: Vec<_> = results.rows.iter().map(|row| row.band).collect();
    assert_eq!(
        bands,
        vec![
            Some(Band::Red),
            Some(Band::Amber),
            Some(Band::Green),
            Some(Band::Green),
            Some(Band::Green),
        ]
    );
    assert_eq!(results.rows[0].cells[0], Cell::text("Leadership"));
    assert_eq!(results.rows[1].cells[2], Cell::Percent(50.0));
    assert_eq!(results.rows[1].cells[2].display(), "50.0%");
    assert_eq!(results.rows[0].cells[3], Cell::text("High"));

    let findings = document.section(SectionKind::Findings).expect("findings section");
    assert_eq!(findings.rows.len(), 2);
    assert_eq!(
        findings.rows[0].cells[3],
        Cell::text("Score below 50%: urgent attention required.")
    );
}

#[test]
fn all_clear_renders_affirmation_instead_of_blank_findings() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 4));
    assert_eq!(report.findings, Findings::AllClear);

    let document = ReportDocument::build(&report, &catalog, &context());

    let findings = document.section(SectionKind::Findings).expect("findings section");
    assert_eq!(findings.rows.len(), 1);
    assert_eq!(findings.rows[0].band, Some(Band::Green));
    assert_eq!(
        findings.rows[0].cells[0],
        Cell::text("All categories scored 70% or higher. Keep up the great work!")
    );

    let insights = document.section(SectionKind::Insights).expect("insights section");
    assert_eq!(insights.rows.len(), 1);
    assert_eq!(
        insights.rows[0].cells[0],
        Cell::text("Every question scored 70% or higher; no corrective actions are needed.")
    );
}

#[test]
fn insight_rows_name_each_category_once() {
    let catalog = catalog();
    let responses = answered_with(&catalog, Locale::En, |category, _| {
        if category == CategoryKey::Recognition {
            1
        } else {
            4
        }
    });
    let report = report_for(&catalog, &responses);

    let document = ReportDocument::build(&report, &catalog, &context());
    let insights = document.section(SectionKind::Insights).expect("insights section");

    assert_eq!(insights.rows.len(), 4);
    assert_eq!(insights.rows[0].cells[0], Cell::text("Recognition & Rewards"));
    assert!(insights.rows[1..]
        .iter()
        .all(|row| row.cells[0] == Cell::Empty));
    assert!(insights.rows.iter().all(|row| row.band == Some(Band::Red)));
}

#[test]
fn reordered_sections_fail_integrity_check() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 2));
    let mut document = ReportDocument::build(&report, &catalog, &context());
    document.sections.swap(2, 3);

    match document.validate() {
        Err(ReportError::StructuralIntegrity(detail)) => assert!(detail.contains("sections")),
        other => panic!("expected integrity failure, got {other:?}"),
    }
    assert!(matches!(
        render_workbook(&document),
        Err(ReportError::StructuralIntegrity(_))
    ));
}

#[test]
fn duplicated_or_missing_sections_fail_integrity_check() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 2));
    let original = ReportDocument::build(&report, &catalog, &context());

    let mut duplicated = original.clone();
    duplicated.sections.push(original.sections[6].clone());
    assert!(duplicated.validate().is_err());

    let mut missing = original.clone();
    missing.sections.remove(4);
    assert!(missing.validate().is_err());

    let mut emptied = original;
    emptied.sections[3].rows.clear();
    match emptied.validate() {
        Err(ReportError::StructuralIntegrity(detail)) => {
            assert!(detail.contains("findings section has no rows"))
        }
        other => panic!("expected integrity failure, got {other:?}"),
    }
}

#[test]
fn overly_wide_rows_fail_integrity_check() {
    let catalog = catalog();
    let report = report_for(&catalog, &uniform(&catalog, Locale::En, 2));
    let mut document = ReportDocument::build(&report, &catalog, &context());
    document.sections[1].rows[0].cells.push(Cell::text("overflow"));
    document.sections[1].rows[0].cells.push(Cell::text("overflow"));
    document.sections[1].rows[0].cells.push(Cell::text("overflow"));

    assert!(matches!(
        document.validate(),
        Err(ReportError::StructuralIntegrity(_))
    ));
}

#[test]
fn chart_csv_lists_category_percentages() {
    let catalog = catalog();
    let responses = answered_with(&catalog, Locale::En, |category, _| {
        if category == CategoryKey::Development {
            0
        } else {
            3
        }
    });
    let report = report_for(&catalog, &responses);
    let document = ReportDocument::build(&report, &catalog, &context());

    let csv = String::from_utf8(document.chart_csv().expect("csv renders")).expect("utf-8");
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Category,Percent",
            "Leadership,75.0",
            "Employee Empowerment,75.0",
            "Communication,75.0",
            "Recognition & Rewards,75.0",
            "Learning & Development,0.0",
        ]
    );
}

#[test]
fn summary_view_mirrors_document_figures() {
    let catalog = catalog();
    let responses = answered_with(&catalog, Locale::En, |category, _| {
        if category == CategoryKey::Communication {
            0
        } else {
            4
        }
    });
    let report = report_for(&catalog, &responses);

    let summary = report.summary(&catalog);

    assert_eq!(summary.overall_score, 80.0);
    assert_eq!(summary.overall_display, "80.0%");
    assert_eq!(summary.grade.label, "Good");
    assert!(!summary.findings.all_clear);
    assert_eq!(summary.findings.items.len(), 1);
    assert_eq!(summary.findings.items[0].label, "Communication");
    assert_eq!(summary.recommendations.len(), 3);
    assert_eq!(summary.chart.len(), 5);

    let insights = report.insights(&catalog);
    assert_eq!(
        insights.strongest.map(|highlight| highlight.category),
        Some(CategoryKey::Leadership)
    );
    assert_eq!(
        insights.weakest.map(|highlight| highlight.category),
        Some(CategoryKey::Communication)
    );
    assert_eq!(insights.spread, 100.0);
    assert_eq!(insights.questions_needing_attention, 3);
    assert_eq!(insights.actions.len(), 1);
}

#[test]
fn engine_thresholds_flow_into_banding() {
    let catalog = catalog();
    let responses = uniform(&catalog, Locale::En, 3);
    let engine = ScoringEngine::new(crate::audit::ScoreThresholds {
        critical_below: 60.0,
        improvement_below: 80.0,
        excellent_from: 95.0,
    });
    let report = crate::audit::AuditReport::assemble(&catalog, &responses, &engine)
        .expect("complete responses assemble");

    let document = ReportDocument::build(&report, &catalog, &context());
    let results = document.section(SectionKind::Results).expect("results section");

    assert!(results.rows.iter().all(|row| row.band == Some(Band::Amber)));
    assert_eq!(report.findings.flagged().len(), 5);
    assert_eq!(report.recommendations.len(), 18);
}

#[test]
fn insights_tolerate_a_report_without_categories() {
    let catalog = catalog();
    let mut report = report_for(&catalog, &uniform(&catalog, Locale::En, 1));
    report.scores.categories.clear();

    let insights = report.insights(&catalog);

    assert!(insights.strongest.is_none());
    assert!(insights.weakest.is_none());
    assert_eq!(insights.spread, 0.0);
    assert_eq!(insights.questions_needing_attention, 18);
}

#[test]
fn report_copy_quotes_the_thresholds_in_force() {
    let catalog = catalog();
    let thresholds = crate::audit::ScoreThresholds {
        critical_below: 40.0,
        improvement_below: 60.0,
        excellent_from: 90.0,
    };
    let engine = ScoringEngine::new(thresholds);
    // Leadership at 50 is Medium under these bounds; Communication at 25 is High.
    let responses = answered_with(&catalog, Locale::En, |category, _| match category {
        CategoryKey::Leadership => 2,
        CategoryKey::Communication => 1,
        _ => 4,
    });
    let report = crate::audit::AuditReport::assemble(&catalog, &responses, &engine)
        .expect("complete responses assemble");

    let document = ReportDocument::build(&report, &catalog, &context());
    let findings = document.section(SectionKind::Findings).expect("findings section");
    let rationales: Vec<_> = findings.rows.iter().map(|row| row.cells[3].display()).collect();
    assert_eq!(
        rationales,
        vec![
            "Score below 60%: improvement opportunity.",
            "Score below 40%: urgent attention required.",
        ]
    );

    let summary = report.summary(&catalog);
    assert_eq!(
        summary.findings.items[0].rationale,
        "Score below 60%: improvement opportunity."
    );

    let spanish = answered_with(&catalog, Locale::Es, |_, _| 4);
    let all_clear = crate::audit::AuditReport::assemble(&catalog, &spanish, &engine)
        .expect("complete responses assemble");
    assert_eq!(
        all_clear.summary(&catalog).findings.affirmation.as_deref(),
        Some("Todas las categorías obtuvieron un 60 % o más. ¡Siga así!")
    );
}
