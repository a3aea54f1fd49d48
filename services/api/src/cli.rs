use crate::demo::{
    run_demo, run_questionnaire, run_report, DemoArgs, QuestionnaireArgs, ReportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use self_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workplace Self-Audit",
    about = "Run the workplace self-assessment service or score answers from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the questionnaire for one language
    Questionnaire(QuestionnaireArgs),
    /// Score an answer sheet and write the downloadable workbook
    Report(ReportArgs),
    /// Score a built-in answer profile end to end
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Questionnaire(args) => run_questionnaire(args),
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoProfile;

    #[test]
    fn parses_report_arguments() {
        let cli = Cli::try_parse_from([
            "self-audit",
            "report",
            "--answers",
            "answers.json",
            "--today",
            "2025-05-01",
            "--organization",
            "Acme",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.answers.to_str(), Some("answers.json"));
                assert_eq!(args.output, None);
                assert_eq!(args.organization.as_deref(), Some("Acme"));
                assert_eq!(
                    args.today.map(|date| date.to_string()),
                    Some("2025-05-01".to_string())
                );
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn demo_defaults_to_mixed_profile() {
        let cli = Cli::try_parse_from(["self-audit", "demo", "--locale", "es"])
            .expect("arguments parse");

        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.profile, DemoProfile::Mixed);
                assert_eq!(args.locale.as_deref(), Some("es"));
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from([
            "self-audit",
            "report",
            "--answers",
            "answers.json",
            "--today",
            "May 1st"
        ])
        .is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["self-audit"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
