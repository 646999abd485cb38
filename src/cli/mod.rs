//! Command-line interface for operon-pair.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **pair**: Run the full pipeline: candidates, reciprocal matching, output
//! - **candidates**: Enumerate cross-family candidate pairs only
//! - **report**: Summarize the distance distribution of a pair table
//!
//! ## Usage
//!
//! ```text
//! # Pair two monomer alignments by genome proximity
//! operon-pair pair family_a.tsv family_b.tsv
//!
//! # Keep the intermediate candidate table and a distance report
//! operon-pair pair family_a.tsv family_b.tsv \
//!     --candidates-out candidates.tsv --report-out distances.tsv
//!
//! # JSON output for scripting
//! operon-pair pair family_a.tsv family_b.tsv --format json
//!
//! # Distance distribution of an existing matched-pair table
//! operon-pair report matched.tsv
//! ```

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;

pub mod candidates;
pub mod pair;
pub mod report;

#[derive(Parser)]
#[command(name = "operon-pair")]
#[command(version)]
#[command(about = "Pair sequences from two protein families by genome proximity")]
#[command(
    long_about = "operon-pair infers which sequences from two protein families are likely to interact,\nusing the heuristic that interacting bacterial gene products are encoded by nearby loci.\n\nGiven two location tables (one CDS observation per row), it enumerates all cross-family\npairs sharing a genome, computes nucleotide distances between their coding sequences,\nand keeps the pairs that are reciprocally closest."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pair two location tables by genome proximity (full pipeline)
    Pair(pair::PairArgs),

    /// Enumerate candidate pairs without reciprocal matching
    Candidates(candidates::CandidatesArgs),

    /// Summarize the distance distribution of a pair table
    Report(report::ReportArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Field delimiter override for input tables
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Comma => ',',
        }
    }
}

/// Delimiter for a table: explicit flag first, then file extension, then tab.
pub(crate) fn delimiter_for(path: &Path, flag: Option<Delimiter>) -> char {
    if let Some(delimiter) = flag {
        return delimiter.as_char();
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => ',',
        _ => '\t',
    }
}

/// Render a pair table in the requested output format.
///
/// `row` projects the two identifiers and the distance out of each record so
/// candidate and matched tables share one renderer.
pub(crate) fn render_pairs<T: Serialize>(
    pairs: &[T],
    row: impl Fn(&T) -> (&str, &str, u64),
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(pairs)?;
            json.push('\n');
            json
        }
        OutputFormat::Tsv => {
            let mut out = String::from("sequence_id_1\tsequence_id_2\tdistance\n");
            for pair in pairs {
                let (id_1, id_2, distance) = row(pair);
                out.push_str(&format!("{id_1}\t{id_2}\t{distance}\n"));
            }
            out
        }
        OutputFormat::Text => {
            let width_1 = pairs
                .iter()
                .map(|p| row(p).0.len())
                .chain(std::iter::once("sequence_id_1".len()))
                .max()
                .unwrap_or(0);
            let width_2 = pairs
                .iter()
                .map(|p| row(p).1.len())
                .chain(std::iter::once("sequence_id_2".len()))
                .max()
                .unwrap_or(0);

            let mut out = format!(
                "{:<width_1$}  {:<width_2$}  distance\n",
                "sequence_id_1", "sequence_id_2"
            );
            for pair in pairs {
                let (id_1, id_2, distance) = row(pair);
                out.push_str(&format!("{id_1:<width_1$}  {id_2:<width_2$}  {distance}\n"));
            }
            out
        }
    };
    Ok(rendered)
}

/// Write rendered output to a file, or to stdout when no path is given.
pub(crate) fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{content}"),
    }
    Ok(())
}
