use crate::demo::{run_demo, DemoArgs};
use crate::rank::{run_rank, RankArgs};
use clap::{Parser, Subcommand};
use scholarship_dss::config::AppConfig;
use scholarship_dss::error::AppError;
use scholarship_dss::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Selection Engine",
    about = "Score and rank scholarship applicant snapshots from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank an applicant snapshot against a criteria snapshot
    Rank(RankArgs),
    /// Walk a built-in sample batch through the pipeline (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Rank(args) => run_rank(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
