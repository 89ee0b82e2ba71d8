use crate::report::{run_catalog_validate, run_insights_report, CatalogArgs, InsightsReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use soil_insights::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Soil Insights",
    about = "Evaluate soil sensor readings against research-backed guidance",
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
    /// Evaluate readings from the command line
    Insights {
        #[command(subcommand)]
        command: InsightsCommand,
    },
    /// Inspect a document catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum InsightsCommand {
    /// Print alerts and recommendations for a reading snapshot
    Report(InsightsReportArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Check a catalog for authoring issues
    Validate(CatalogArgs),
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
        Command::Insights {
            command: InsightsCommand::Report(args),
        } => run_insights_report(args),
        Command::Catalog {
            command: CatalogCommand::Validate(args),
        } => run_catalog_validate(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["soil-insights-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_report_overrides() {
        let cli = Cli::try_parse_from([
            "soil-insights-api",
            "insights",
            "report",
            "--ph",
            "8.4",
            "--document",
            "3",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Insights {
                command: InsightsCommand::Report(args),
            }) => {
                assert_eq!(args.ph, Some(8.4));
                assert_eq!(args.document.as_deref(), Some("3"));
                assert!(args.json);
                assert!(args.readings_csv.is_none());
            }
            other => panic!("expected insights report, got {other:?}"),
        }
    }
}
