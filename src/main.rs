use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod jobs;
mod matching;
mod parsing;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("operon_pair=debug,info")
    } else {
        EnvFilter::new("operon_pair=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Pair(args) => {
            cli::pair::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Candidates(args) => {
            cli::candidates::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Report(args) => {
            cli::report::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
