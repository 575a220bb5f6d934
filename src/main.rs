use anyhow::Result;
use clap::Parser;
use crawlplot::utils::{setup_logging, validate_args};
use crawlplot::{print_run_summary, Args, StatsVisualizer};
use tracing::error;

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match StatsVisualizer::from_args(&args).run() {
        Ok(summary) => {
            print_run_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!(action = "fail", component = "stats_visualizer", error = %e, "Visualization failed");
            std::process::exit(1);
        }
    }
}
