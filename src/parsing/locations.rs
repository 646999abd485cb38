use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::core::location::{CdsLocation, LocationTable};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid location table format: {0}")]
    InvalidFormat(String),

    #[error("Header is missing required column: {0}")]
    MissingColumn(&'static str),
}

/// Accepted header names per role. The first spelling is the one the
/// annotation extraction stage writes; the rest are common aliases.
const GENOME_COLUMNS: &[&str] = &["genome_id", "genome"];
const SEQUENCE_COLUMNS: &[&str] = &["full_id", "sequence_id", "uniprot_id"];
const START_COLUMNS: &[&str] = &["gene_start", "start"];
const END_COLUMNS: &[&str] = &["gene_end", "end"];

/// Field positions of the four required columns within a row
#[derive(Clone, Copy)]
struct ColumnMap {
    genome_id: usize,
    sequence_id: usize,
    start: usize,
    end: usize,
}

impl ColumnMap {
    /// Positional layout used when no header line is present
    fn positional() -> Self {
        Self {
            genome_id: 0,
            sequence_id: 1,
            start: 2,
            end: 3,
        }
    }

    fn from_header(fields: &[&str]) -> Result<Self, ParseError> {
        let locate = |names: &[&str], label: &'static str| -> Result<usize, ParseError> {
            fields
                .iter()
                .position(|f| names.contains(&f.trim().to_lowercase().as_str()))
                .ok_or(ParseError::MissingColumn(label))
        };

        Ok(Self {
            genome_id: locate(GENOME_COLUMNS, "genome_id")?,
            sequence_id: locate(SEQUENCE_COLUMNS, "full_id")?,
            start: locate(START_COLUMNS, "gene_start")?,
            end: locate(END_COLUMNS, "gene_end")?,
        })
    }

    fn width(&self) -> usize {
        self.genome_id
            .max(self.sequence_id)
            .max(self.start)
            .max(self.end)
            + 1
    }
}

/// Parse a location table from a TSV/CSV file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors
/// documented on [`parse_location_text`].
pub fn parse_location_file(path: &Path, delimiter: char) -> Result<LocationTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_location_text(&content, delimiter)
}

/// Parse location-table text with columns: `genome_id`, `full_id`,
/// `gene_start`, `gene_end`.
///
/// An optional header on the first data line is detected by its first field;
/// with a header the four columns are located by name and extra columns are
/// ignored, without one the first four fields are taken positionally.
///
/// Rows with a missing coordinate (empty field, `NA`, `nan`, `null`) are
/// silently dropped: partial annotation coverage is expected and degrades
/// gracefully. A non-null coordinate that fails to parse as an integer is a
/// schema violation and fails fast. An empty table after filtering is valid.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for short rows or unparseable
/// coordinates, or `ParseError::MissingColumn` if a header lacks a required
/// column.
pub fn parse_location_text(text: &str, delimiter: char) -> Result<LocationTable, ParseError> {
    let mut rows = Vec::new();
    let mut columns: Option<ColumnMap> = None;
    let mut skipped = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        let map = if let Some(map) = columns {
            map
        } else {
            // first data line: header if it leads with a recognized column name
            let first = fields
                .first()
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default();
            if GENOME_COLUMNS.contains(&first.as_str()) {
                columns = Some(ColumnMap::from_header(&fields)?);
                continue;
            }
            let map = ColumnMap::positional();
            columns = Some(map);
            map
        };

        if fields.len() < map.width() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected at least {}",
                fields.len(),
                map.width()
            )));
        }

        let genome_id = fields[map.genome_id].trim();
        let sequence_id = fields[map.sequence_id].trim();
        let start = parse_coordinate(fields[map.start], line_num)?;
        let end = parse_coordinate(fields[map.end], line_num)?;

        // rows missing location information are dropped, not reported
        let (Some(start), Some(end)) = (start, end) else {
            skipped += 1;
            continue;
        };
        if genome_id.is_empty() || is_null(genome_id) || sequence_id.is_empty() {
            skipped += 1;
            continue;
        }

        rows.push(CdsLocation::new(genome_id, sequence_id, start, end));
    }

    if skipped > 0 {
        debug!(skipped, kept = rows.len(), "dropped rows with missing annotation");
    }

    Ok(LocationTable::new(rows))
}

/// Parse one coordinate field. `None` means the annotation is missing;
/// anything else must be a valid unsigned integer.
fn parse_coordinate(field: &str, line_num: usize) -> Result<Option<u64>, ParseError> {
    let field = field.trim();
    if field.is_empty() || is_null(field) {
        return Ok(None);
    }

    // annotation stages that round-trip through floating point emit "1234.0"
    let integral = field.strip_suffix(".0").unwrap_or(field);

    integral.parse::<u64>().map(Some).map_err(|_| {
        ParseError::InvalidFormat(format!(
            "Invalid coordinate on line {line_num}: '{field}'"
        ))
    })
}

fn is_null(field: &str) -> bool {
    matches!(field.to_lowercase().as_str(), "na" | "nan" | "null" | "none")
}
