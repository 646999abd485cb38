use std::path::PathBuf;

use clap::Args;

use crate::cli::{delimiter_for, emit, render_pairs, Delimiter, OutputFormat};
use crate::matching::candidates::find_candidates;
use crate::parsing::locations::parse_location_file;

#[derive(Args)]
pub struct CandidatesArgs {
    /// Location table for the first monomer alignment (TSV or CSV)
    pub table_1: PathBuf,

    /// Location table for the second monomer alignment (TSV or CSV)
    pub table_2: PathBuf,

    /// Field delimiter (auto-detected from the file extension by default)
    #[arg(long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Write the candidate table to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute candidates subcommand
///
/// # Errors
///
/// Returns an error if an input table cannot be parsed or the output cannot
/// be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CandidatesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table_1 = parse_location_file(&args.table_1, delimiter_for(&args.table_1, args.delimiter))?;
    let table_2 = parse_location_file(&args.table_2, delimiter_for(&args.table_2, args.delimiter))?;

    if verbose {
        eprintln!(
            "Parsed {} rows from {} and {} rows from {}",
            table_1.len(),
            args.table_1.display(),
            table_2.len(),
            args.table_2.display()
        );
    }

    let candidates = find_candidates(&table_1, &table_2);

    if verbose {
        eprintln!("Enumerated {} candidate pairs", candidates.len());
    }

    let rendered = render_pairs(
        &candidates,
        |c| (c.sequence_id_1.as_str(), c.sequence_id_2.as_str(), c.distance),
        format,
    )?;
    emit(&rendered, args.output.as_deref())
}
