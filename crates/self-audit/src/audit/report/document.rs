//! Sheet-agnostic layout of the downloadable report.
//!
//! [`ReportDocument::build`] decides what goes where: section order, header
//! rows, typed cells and the color band of every scored row. The workbook
//! renderer only translates that layout into spreadsheet formatting.

use chrono::NaiveDate;
use serde::Serialize;

use super::super::catalog::ContentCatalog;
use super::super::domain::Band;
use super::super::findings::Findings;
use super::summary::{rationale, with_threshold, AuditReport};
use super::views::format_percent;
use super::ReportError;

pub const SHEET_NAME: &str = "Audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Title,
    Summary,
    Results,
    Findings,
    Insights,
    ChartData,
    Contact,
}

impl SectionKind {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Title,
            Self::Summary,
            Self::Results,
            Self::Findings,
            Self::Insights,
            Self::ChartData,
            Self::Contact,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Percent(f64),
    Score(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(value) => value.clone(),
            Cell::Percent(value) => format_percent(*value),
            Cell::Score(value) => format!("{value:.1}"),
            Cell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<Band>,
    pub strong: bool,
}

impl Row {
    fn plain(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            band: None,
            strong: false,
        }
    }

    fn banded(cells: Vec<Cell>, band: Band) -> Self {
        Self {
            cells,
            band: Some(band),
            strong: false,
        }
    }

    fn strong(mut self) -> Self {
        self.strong = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

/// Caller-supplied metadata that is not derived from the answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContext {
    pub generated_on: NaiveDate,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub sheet_name: String,
    pub column_widths: Vec<f64>,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    pub fn build(report: &AuditReport, catalog: &ContentCatalog, context: &ReportContext) -> Self {
        let locale = report.locale;
        let content = catalog.content(locale);
        let text = &content.report;
        let thresholds = &report.thresholds;

        let mut metadata = vec![
            Row::plain(vec![
                Cell::text(&text.generated_label),
                Cell::text(context.generated_on.format("%Y-%m-%d").to_string()),
            ]),
            Row::plain(vec![
                Cell::text(&text.language_label),
                Cell::text(locale.label()),
            ]),
        ];
        if let Some(organization) = context
            .organization
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            metadata.push(Row::plain(vec![
                Cell::text(&text.organization_label),
                Cell::text(organization.trim()),
            ]));
        }

        let overall = report.scores.overall;
        let summary = vec![
            Row::banded(
                vec![Cell::text(&text.overall_score_label), Cell::Percent(overall)],
                thresholds.band(overall),
            )
            .strong(),
            Row::plain(vec![
                Cell::text(&text.grade_label),
                Cell::text(report.grade.label),
            ])
            .strong(),
            Row::plain(vec![
                Cell::text(&text.assessment_label),
                Cell::text(&report.grade.narrative),
            ]),
        ];

        let results = report
            .scores
            .categories
            .iter()
            .map(|result| {
                Row::banded(
                    vec![
                        Cell::text(catalog.category_label(locale, result.category)),
                        Cell::Score(result.score),
                        Cell::Percent(result.percent),
                        Cell::text(result.priority.label(locale)),
                    ],
                    thresholds.band(result.percent),
                )
            })
            .collect();

        let findings = match &report.findings {
            Findings::AllClear => vec![Row::banded(
                vec![Cell::text(with_threshold(
                    &text.affirmation,
                    thresholds.improvement_below,
                ))],
                Band::Green,
            )],
            Findings::Flagged(flagged) => flagged
                .iter()
                .map(|finding| {
                    Row::banded(
                        vec![
                            Cell::text(catalog.category_label(locale, finding.category)),
                            Cell::Percent(finding.percent),
                            Cell::text(finding.priority.label(locale)),
                            Cell::text(rationale(catalog, locale, finding.priority, thresholds)),
                        ],
                        thresholds.band(finding.percent),
                    )
                })
                .collect(),
        };

        let insights = report.insights(catalog);
        let mut actions = Vec::new();
        for group in &insights.actions {
            for (position, item) in group.items.iter().enumerate() {
                let category = if position == 0 {
                    Cell::text(&group.label)
                } else {
                    Cell::Empty
                };
                actions.push(Row::banded(
                    vec![
                        category,
                        Cell::text(&item.question),
                        Cell::Percent(f64::from(item.score)),
                        Cell::text(&item.recommendation),
                    ],
                    thresholds.band(f64::from(item.score)),
                ));
            }
        }
        if actions.is_empty() {
            actions.push(Row::banded(
                vec![Cell::text(with_threshold(
                    &text.no_recommendations,
                    thresholds.improvement_below,
                ))],
                Band::Green,
            ));
        }

        let chart = report
            .scores
            .categories
            .iter()
            .map(|result| {
                Row::plain(vec![
                    Cell::text(catalog.category_label(locale, result.category)),
                    Cell::Percent(result.percent),
                ])
            })
            .collect();

        let contact = content
            .contact
            .lines
            .iter()
            .map(|line| Row::plain(vec![Cell::text(line)]))
            .collect();

        let sections = vec![
            Section {
                kind: SectionKind::Title,
                title: text.title.clone(),
                header: vec![text.field_header.clone(), text.value_header.clone()],
                rows: metadata,
            },
            Section {
                kind: SectionKind::Summary,
                title: text.summary_title.clone(),
                header: vec![text.field_header.clone(), text.value_header.clone()],
                rows: summary,
            },
            Section {
                kind: SectionKind::Results,
                title: text.results_title.clone(),
                header: vec![
                    text.category_header.clone(),
                    text.score_header.clone(),
                    text.percent_header.clone(),
                    text.priority_header.clone(),
                ],
                rows: results,
            },
            Section {
                kind: SectionKind::Findings,
                title: text.findings_title.clone(),
                header: vec![
                    text.category_header.clone(),
                    text.percent_header.clone(),
                    text.priority_header.clone(),
                    text.rationale_header.clone(),
                ],
                rows: findings,
            },
            Section {
                kind: SectionKind::Insights,
                title: text.insights_title.clone(),
                header: vec![
                    text.category_header.clone(),
                    text.question_header.clone(),
                    text.score_header.clone(),
                    text.recommendation_header.clone(),
                ],
                rows: actions,
            },
            Section {
                kind: SectionKind::ChartData,
                title: text.chart_title.clone(),
                header: vec![text.category_header.clone(), text.percent_header.clone()],
                rows: chart,
            },
            Section {
                kind: SectionKind::Contact,
                title: text.contact_title.clone(),
                header: vec![content.contact.heading.clone()],
                rows: contact,
            },
        ];

        Self {
            sheet_name: SHEET_NAME.to_string(),
            column_widths: vec![34.0, 48.0, 14.0, 70.0],
            sections,
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Checks the layout invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ReportError> {
        let kinds: Vec<SectionKind> = self.sections.iter().map(|section| section.kind).collect();
        if kinds != SectionKind::ordered() {
            return Err(ReportError::StructuralIntegrity(format!(
                "expected sections {:?}, found {:?}",
                SectionKind::ordered(),
                kinds
            )));
        }

        let width = self.column_widths.len();
        for section in &self.sections {
            if section.header.is_empty() || section.header.len() > width {
                return Err(ReportError::StructuralIntegrity(format!(
                    "{:?} header has {} column(s); expected 1..={width}",
                    section.kind,
                    section.header.len()
                )));
            }
            if let Some(row) = section.rows.iter().find(|row| row.cells.len() > width) {
                return Err(ReportError::StructuralIntegrity(format!(
                    "{:?} row has {} cells but the sheet defines {width} columns",
                    section.kind,
                    row.cells.len()
                )));
            }
        }

        if self
            .section(SectionKind::Findings)
            .is_some_and(|findings| findings.rows.is_empty())
        {
            return Err(ReportError::StructuralIntegrity(
                "findings section has no rows".to_string(),
            ));
        }

        Ok(())
    }

    /// Chart-ready category percentages as CSV, for renderers outside the workbook.
    pub fn chart_csv(&self) -> Result<Vec<u8>, ReportError> {
        let section = self.section(SectionKind::ChartData).ok_or_else(|| {
            ReportError::StructuralIntegrity("chart data section missing".to_string())
        })?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&section.header)?;
        for row in &section.rows {
            let record: Vec<String> = row
                .cells
                .iter()
                .map(|cell| match cell {
                    Cell::Percent(value) | Cell::Score(value) => format!("{value:.1}"),
                    other => other.display(),
                })
                .collect();
            writer.write_record(&record)?;
        }

        writer
            .into_inner()
            .map_err(|err| ReportError::Csv(csv::Error::from(err.into_error())))
    }
}

