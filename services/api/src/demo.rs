use crate::infra::{parse_date, read_answer_sheet, AuditService};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use self_audit::audit::report::views::{AuditInsights, AuditSummaryView};
use self_audit::audit::{
    questionnaire, AnswerSheet, AuditReport, CategoryKey, ContentCatalog, Locale, ResponseSet,
    REPORT_FILENAME,
};
use self_audit::config::AppConfig;
use self_audit::error::AppError;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct QuestionnaireArgs {
    /// Language code (en, es). Defaults to AUDIT_DEFAULT_LOCALE.
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Print the questionnaire as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// JSON answer sheet: {"locale": "en", "answers": {"leadership": ["Often", ...], ...}}
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Where to write the workbook (defaults to audit_results.xlsx)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Organization name printed in the report header
    #[arg(long)]
    pub(crate) organization: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Language code (en, es). Defaults to AUDIT_DEFAULT_LOCALE.
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Canned answer pattern to score
    #[arg(long, value_enum, default_value_t = DemoProfile::Mixed)]
    pub(crate) profile: DemoProfile,
    /// Also write the workbook to this path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    /// Mostly top answers; lands in the excellent band
    Strong,
    /// One category per priority tier
    Mixed,
    /// Low answers everywhere
    Critical,
}

impl DemoProfile {
    /// Option position (0 = lowest score) chosen for a question.
    fn position(self, category: CategoryKey, question_index: usize) -> usize {
        match self {
            DemoProfile::Strong => {
                if question_index == 0 && category == CategoryKey::Development {
                    3
                } else {
                    4
                }
            }
            DemoProfile::Mixed => match category {
                CategoryKey::Leadership => 4,
                CategoryKey::EmployeeEmpowerment | CategoryKey::Development => 3,
                CategoryKey::Communication => 2,
                CategoryKey::Recognition => 1,
            },
            DemoProfile::Critical => question_index % 2,
        }
    }

    fn responses(self, catalog: &ContentCatalog, locale: Locale) -> Result<ResponseSet, AppError> {
        let mut responses = ResponseSet::initialize(catalog, locale);
        for category in CategoryKey::ordered() {
            for index in 0..catalog.question_count(category) {
                let Some(question) = catalog.question(locale, category, index) else {
                    continue;
                };
                let position = self.position(category, index);
                let description = &catalog.options(locale, question.kind)[position];
                responses.record(catalog, category, index, description)?;
            }
        }
        Ok(responses)
    }
}

pub(crate) fn run_questionnaire(args: QuestionnaireArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = AuditService::from_settings(&config.audit)?;
    let locale = service.resolve_locale(args.locale.as_deref())?;
    let view = questionnaire(service.catalog(), locale);

    if args.json {
        let rendered = serde_json::to_string_pretty(&view)?;
        println!("{rendered}");
        return Ok(());
    }

    println!("Workplace self-assessment ({})", locale.label());
    for category in &view.categories {
        println!("\n{}", category.label);
        for question in &category.questions {
            println!("  {}. {}", question.index + 1, question.text);
            println!("     options: {}", question.options.join(" | "));
        }
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        answers,
        output,
        today,
        organization,
    } = args;

    let config = AppConfig::load()?;
    let service = AuditService::from_settings(&config.audit)?;
    let sheet = read_answer_sheet(&answers)?;

    let report = service.assemble(&sheet)?;
    render_summary(service.catalog(), &report);

    let output = output.unwrap_or_else(|| PathBuf::from(REPORT_FILENAME));
    let bytes = service.workbook(&report, today, organization)?;
    write_workbook(&output, &bytes)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        locale,
        profile,
        output,
    } = args;

    let config = AppConfig::load()?;
    let service = AuditService::from_settings(&config.audit)?;
    let locale = service.resolve_locale(locale.as_deref())?;
    let catalog = service.catalog();

    println!("Workplace self-assessment demo ({profile:?} profile)");
    let responses = profile.responses(catalog, locale)?;
    let progress = responses.progress();
    println!(
        "- {}/{} questions answered in {}",
        progress.answered,
        progress.total,
        locale.label()
    );

    // Round-trip through the wire format the HTTP surface accepts.
    let sheet = AnswerSheet::from_responses(catalog, &responses);
    let report = service.assemble(&sheet)?;
    render_summary(catalog, &report);

    if let Some(path) = output {
        let bytes = service.workbook(&report, None, None)?;
        write_workbook(&path, &bytes)?;
    }
    Ok(())
}

fn render_summary(catalog: &ContentCatalog, report: &AuditReport) {
    let summary = report.summary(catalog);
    let insights = report.insights(catalog);
    print_summary(&summary);
    print_insights(&insights);
}

fn print_summary(summary: &AuditSummaryView) {
    println!(
        "\nOverall score {} -> {}",
        summary.overall_display, summary.grade.label
    );
    println!("  {}", summary.grade.narrative);

    println!("\nCategory results");
    for category in &summary.categories {
        println!(
            "- {:<34} {:>7} | priority {}",
            category.label, category.percent_display, category.priority_label
        );
    }

    println!("\nKey findings");
    if let Some(affirmation) = &summary.findings.affirmation {
        println!("- {affirmation}");
    }
    for finding in &summary.findings.items {
        println!(
            "- {} ({}, {}): {}",
            finding.label, finding.percent_display, finding.priority_label, finding.rationale
        );
    }
}

fn print_insights(insights: &AuditInsights) {
    if let (Some(strongest), Some(weakest)) = (&insights.strongest, &insights.weakest) {
        println!(
            "\nStrongest: {} ({:.1}%) | weakest: {} ({:.1}%) | spread {:.1} points",
            strongest.label, strongest.percent, weakest.label, weakest.percent, insights.spread
        );
    }
    if insights.actions.is_empty() {
        return;
    }

    println!(
        "{} question(s) need attention:",
        insights.questions_needing_attention
    );
    for group in &insights.actions {
        println!("  {}", group.label);
        for item in &group.items {
            println!("    - [{:>3}] {}", item.score, item.question);
            println!("      {}", item.recommendation);
        }
    }
}

fn write_workbook(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    std::fs::write(path, bytes)?;
    println!("\nWorkbook written to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use self_audit::audit::{GradeTier, ScoringEngine, OPTION_SCORES};

    fn assemble(profile: DemoProfile, locale: Locale) -> AuditReport {
        let catalog = ContentCatalog::standard().expect("standard content validates");
        let responses = profile
            .responses(&catalog, locale)
            .expect("profile answers are valid");
        AuditReport::assemble(&catalog, &responses, &ScoringEngine::default())
            .expect("profile completes the audit")
    }

    #[test]
    fn profiles_land_in_distinct_grades() {
        assert_eq!(
            assemble(DemoProfile::Strong, Locale::En).grade.tier,
            GradeTier::Excellent
        );
        assert_eq!(
            assemble(DemoProfile::Mixed, Locale::Es).grade.tier,
            GradeTier::NeedsImprovement
        );
        assert_eq!(
            assemble(DemoProfile::Critical, Locale::En).grade.tier,
            GradeTier::Critical
        );
    }

    #[test]
    fn mixed_profile_flags_two_categories() {
        let report = assemble(DemoProfile::Mixed, Locale::En);
        let flagged: Vec<_> = report
            .findings
            .flagged()
            .iter()
            .map(|finding| finding.category)
            .collect();
        assert_eq!(
            flagged,
            vec![CategoryKey::Communication, CategoryKey::Recognition]
        );
    }

    #[test]
    fn profile_positions_stay_on_the_scale() {
        for profile in [DemoProfile::Strong, DemoProfile::Mixed, DemoProfile::Critical] {
            for category in CategoryKey::ordered() {
                for index in 0..4 {
                    assert!(profile.position(category, index) < OPTION_SCORES.len());
                }
            }
        }
    }
}
