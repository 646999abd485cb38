use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::{delimiter_for, emit, Delimiter, OutputFormat};
use crate::parsing::pairs::parse_pair_file;
use crate::report::DistanceDistribution;

#[derive(Args)]
pub struct ReportArgs {
    /// Matched-pair table to summarize (TSV or CSV)
    pub pairs: PathBuf,

    /// Field delimiter (auto-detected from the file extension by default)
    #[arg(long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Write the cumulative distribution to this file (TSV)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Summary statistics over the matched distances
#[derive(Serialize)]
struct DistributionSummary {
    pairs: usize,
    min_distance: u64,
    median_distance: u64,
    max_distance: u64,
}

/// Execute report subcommand
///
/// # Errors
///
/// Returns an error if the pair table cannot be parsed, contains no
/// distances, or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReportArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let pairs = parse_pair_file(&args.pairs, delimiter_for(&args.pairs, args.delimiter))?;

    if verbose {
        eprintln!("Parsed {} pairs from {}", pairs.len(), args.pairs.display());
    }

    let distribution = DistanceDistribution::from_pairs(&pairs)?;

    if let Some(path) = &args.output {
        distribution.write_tsv(path)?;
        if verbose {
            eprintln!("Wrote distance distribution to {}", path.display());
        }
    }

    let summary = DistributionSummary {
        pairs: distribution.count(),
        min_distance: distribution.min(),
        median_distance: distribution.median(),
        max_distance: distribution.max(),
    };

    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&summary)?;
            json.push('\n');
            json
        }
        OutputFormat::Tsv => {
            let mut out = String::from("distance\tcumulative_sequences\n");
            for (distance, count) in distribution.cumulative() {
                out.push_str(&format!("{distance}\t{count}\n"));
            }
            out
        }
        OutputFormat::Text => format!(
            "Matched pairs:   {}\nMin distance:    {}\nMedian distance: {}\nMax distance:    {}\n",
            summary.pairs, summary.min_distance, summary.median_distance, summary.max_distance
        ),
    };

    // summary goes to stdout even when the distribution went to a file
    emit(&rendered, None)
}
