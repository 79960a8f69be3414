use crate::demo::{run_demo, run_portfolio_report, DemoArgs, PortfolioReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dca_triage::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Collections Triage Service",
    about = "Score, route, and monitor outstanding debt-collection cases from the command line",
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
    /// Generate portfolio-level reports for operations reviews
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommand,
    },
    /// Run an end-to-end CLI demo over a fixed sample portfolio
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum PortfolioCommand {
    /// Print KPIs, the alert feed, and agency standings for a case export
    Report(PortfolioReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Case export CSV to serve; falls back to the built-in demo portfolio
    #[arg(long)]
    pub(crate) cases: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Portfolio {
            command: PortfolioCommand::Report(args),
        } => run_portfolio_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
