use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::cli::{delimiter_for, emit, render_pairs, Delimiter, OutputFormat};
use crate::jobs::{tracker_for, JobStatus, JobTracker, TrackerConfig};
use crate::matching::candidates::find_candidates;
use crate::matching::reciprocal::{MatcherConfig, ReciprocalMatcher, TieBreak};
use crate::parsing::locations::parse_location_file;
use crate::report::DistanceDistribution;

/// Tie-break rule applied when several candidates share the minimum distance
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum TieBreakArg {
    /// Prefer the lexicographically smallest partner identifier
    #[default]
    PartnerAsc,
    /// Prefer the lexicographically largest partner identifier
    PartnerDesc,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::PartnerAsc => TieBreak::PartnerIdAsc,
            TieBreakArg::PartnerDesc => TieBreak::PartnerIdDesc,
        }
    }
}

#[derive(Args)]
pub struct PairArgs {
    /// Location table for the first monomer alignment (TSV or CSV)
    pub table_1: PathBuf,

    /// Location table for the second monomer alignment (TSV or CSV)
    pub table_2: PathBuf,

    /// Field delimiter (auto-detected from the file extension by default)
    #[arg(long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Tie-break rule for minimum-distance selection
    #[arg(long, value_enum, default_value = "partner-asc")]
    pub tie_break: TieBreakArg,

    /// Write matched pairs to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the intermediate candidate table (TSV)
    #[arg(long)]
    pub candidates_out: Option<PathBuf>,

    /// Also write the distance distribution (TSV)
    #[arg(long)]
    pub report_out: Option<PathBuf>,

    // === Job tracking options ===
    /// Track job status under this name
    #[arg(long)]
    pub job_name: Option<String>,

    /// Group the tracked job belongs to
    #[arg(long, requires = "job_name")]
    pub job_group: Option<String>,

    /// Job tracker backend
    #[arg(long, default_value = "null", requires = "job_name")]
    pub job_backend: String,

    /// Store file for the `file` job backend
    #[arg(long, requires = "job_name")]
    pub job_store: Option<PathBuf>,
}

/// Execute pair subcommand
///
/// # Errors
///
/// Returns an error if an input table cannot be parsed, an output cannot be
/// written, or the job tracker cannot be constructed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PairArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut tracker = make_tracker(&args)?;

    let result = execute(&args, format, verbose, tracker.as_deref_mut());

    if let Some(tracker) = tracker.as_deref_mut() {
        let status = if result.is_ok() {
            JobStatus::Done
        } else {
            JobStatus::Failed
        };
        if let Err(e) = tracker.update(Some(status), None) {
            warn!("failed to record final job status: {e}");
        }
    }

    result
}

fn make_tracker(args: &PairArgs) -> anyhow::Result<Option<Box<dyn JobTracker>>> {
    let Some(job_name) = &args.job_name else {
        return Ok(None);
    };

    let config = TrackerConfig {
        backend: args.job_backend.clone(),
        job_name: job_name.clone(),
        job_group: args.job_group.clone(),
        store_path: args.job_store.clone(),
    };
    Ok(Some(tracker_for(&config)?))
}

fn execute(
    args: &PairArgs,
    format: OutputFormat,
    verbose: bool,
    mut tracker: Option<&mut (dyn JobTracker + '_)>,
) -> anyhow::Result<()> {
    if let Some(t) = tracker.as_deref_mut() {
        t.update(Some(JobStatus::Running), Some("candidates"))?;
    }

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

    if let Some(path) = &args.candidates_out {
        let rendered = render_pairs(
            &candidates,
            |c| (c.sequence_id_1.as_str(), c.sequence_id_2.as_str(), c.distance),
            OutputFormat::Tsv,
        )?;
        emit(&rendered, Some(path))?;
    }

    if let Some(t) = tracker.as_deref_mut() {
        t.update(None, Some("matching"))?;
    }

    let matcher = ReciprocalMatcher::with_config(MatcherConfig {
        tie_break: args.tie_break.into(),
    });
    let matches = matcher.find_matches(&candidates);

    if verbose {
        eprintln!("Selected {} reciprocal best hits", matches.len());
    }

    if let Some(t) = tracker.as_deref_mut() {
        t.update(None, Some("report"))?;
    }

    if let Some(path) = &args.report_out {
        let distribution = DistanceDistribution::from_pairs(&matches)?;
        distribution.write_tsv(path)?;
        if verbose {
            eprintln!("Wrote distance distribution to {}", path.display());
        }
    }

    let rendered = render_pairs(
        &matches,
        |m| (m.sequence_id_1.as_str(), m.sequence_id_2.as_str(), m.distance),
        format,
    )?;
    emit(&rendered, args.output.as_deref())
}
