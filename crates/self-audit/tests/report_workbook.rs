use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use self_audit::audit::{
    generate_report, report_mime, AuditReport, CategoryKey, ContentCatalog, Locale,
    ReportContext, ReportDocument, ResponseSet, ScoringEngine, REPORT_FILENAME,
};

fn mixed_report(catalog: &ContentCatalog, locale: Locale) -> AuditReport {
    let mut responses = ResponseSet::initialize(catalog, locale);
    for category in CategoryKey::ordered() {
        let position = match category {
            CategoryKey::Leadership => 4,
            CategoryKey::Communication => 1,
            _ => 3,
        };
        for index in 0..catalog.question_count(category) {
            let kind = catalog
                .question(locale, category, index)
                .expect("question exists")
                .kind;
            let description = catalog.options(locale, kind)[position].clone();
            responses
                .record(catalog, category, index, &description)
                .expect("option is valid");
        }
    }
    AuditReport::assemble(catalog, &responses, &ScoringEngine::default())
        .expect("complete session scores")
}

fn context() -> ReportContext {
    ReportContext {
        generated_on: NaiveDate::from_ymd_opt(2025, 1, 20).expect("valid date"),
        organization: Some("Contoso".to_string()),
    }
}

fn read_rows(bytes: Vec<u8>) -> (Vec<String>, Vec<Vec<Data>>) {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).expect("workbook reopens");
    let names = workbook.sheet_names().to_vec();
    let range = workbook
        .worksheet_range(&names[0])
        .expect("worksheet readable");
    let rows = range.rows().map(|row| row.to_vec()).collect();
    (names, rows)
}

fn column_a(rows: &[Vec<Data>]) -> Vec<String> {
    rows.iter()
        .map(|row| match row.first() {
            Some(Data::String(value)) => value.clone(),
            _ => String::new(),
        })
        .collect()
}

#[test]
fn workbook_has_one_sheet_with_sections_in_order() {
    let catalog = ContentCatalog::standard().expect("standard content validates");
    let report = mixed_report(&catalog, Locale::En);

    let bytes = generate_report(&report, &catalog, &context()).expect("workbook renders");
    assert!(bytes.starts_with(b"PK"));

    let (names, rows) = read_rows(bytes);
    assert_eq!(names, vec!["Audit".to_string()]);

    let first_column = column_a(&rows);
    let document = ReportDocument::build(&report, &catalog, &context());
    let mut last = None;
    for section in &document.sections {
        let position = first_column
            .iter()
            .position(|value| value == &section.title)
            .unwrap_or_else(|| panic!("section '{}' missing from workbook", section.title));
        if let Some(previous) = last {
            assert!(position > previous, "section '{}' out of order", section.title);
        }
        last = Some(position);
    }
    assert_eq!(first_column[0], "Workplace Self-Assessment Results");
}

#[test]
fn percent_cells_are_stored_as_numbers() {
    let catalog = ContentCatalog::standard().expect("standard content validates");
    let report = mixed_report(&catalog, Locale::En);

    let bytes = generate_report(&report, &catalog, &context()).expect("workbook renders");
    let (_, rows) = read_rows(bytes);

    let overall = rows
        .iter()
        .find(|row| matches!(row.first(), Some(Data::String(label)) if label == "Overall score"))
        .expect("overall score row");
    assert_eq!(overall.get(1), Some(&Data::Float(report.scores.overall)));

    let communication = rows
        .iter()
        .find(|row| matches!(row.first(), Some(Data::String(label)) if label == "Communication"))
        .expect("communication row");
    assert_eq!(communication.get(2), Some(&Data::Float(25.0)));
    assert_eq!(
        communication.get(3),
        Some(&Data::String("High".to_string()))
    );
}

#[test]
fn spanish_workbook_uses_spanish_titles() {
    let catalog = ContentCatalog::standard().expect("standard content validates");
    let report = mixed_report(&catalog, Locale::Es);

    let bytes = generate_report(&report, &catalog, &context()).expect("workbook renders");
    let (_, rows) = read_rows(bytes);
    let first_column = column_a(&rows);

    let text = &catalog.content(Locale::Es).report;
    for title in [&text.title, &text.findings_title, &text.contact_title] {
        assert!(first_column.contains(title), "missing '{title}'");
    }
    assert!(first_column.iter().any(|value| value == "Comunicación"));
}

#[test]
fn download_metadata_is_stable() {
    assert_eq!(REPORT_FILENAME, "audit_results.xlsx");
    assert_eq!(
        report_mime().essence_str(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
}
