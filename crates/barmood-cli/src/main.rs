mod analyze;
mod chart;
mod controller;
mod present;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::analyze::AnalyzeArgs;
use crate::present::Presenter;

#[derive(Debug, Parser)]
#[command(name = "barmood")]
#[command(about = "Scrape bar reviews, score their sentiment and rank the bars")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    analyze: AnalyzeArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one scrape-score-rank analysis (the default)
    Analyze(AnalyzeArgs),
}

impl Cli {
    fn into_analyze_args(self) -> AnalyzeArgs {
        match self.command {
            Some(Commands::Analyze(args)) => args,
            None => self.analyze,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse().into_analyze_args();
    let config = barmood_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let color = io::stdout().is_terminal();
    let mut presenter = Presenter::new(io::stdout(), color);
    analyze::run_analyze(config, &args, &mut presenter).await
}
