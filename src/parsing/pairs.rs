use std::path::Path;

use crate::core::pair::MatchedPair;
use crate::parsing::locations::ParseError;

/// Parse a pair table (candidate or matched) from a TSV/CSV file.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the errors
/// documented on [`parse_pair_text`].
pub fn parse_pair_file(path: &Path, delimiter: char) -> Result<Vec<MatchedPair>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_pair_text(&content, delimiter)
}

/// Parse pair-table text with columns: `sequence_id_1`, `sequence_id_2`,
/// `distance`.
///
/// This is the format the `pair` and `candidates` subcommands write; an
/// optional header line is skipped. Pair tables are machine-produced, so a
/// malformed distance is a schema violation and fails fast rather than being
/// filtered.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for rows with fewer than three fields
/// or a non-integer distance.
pub fn parse_pair_text(text: &str, delimiter: char) -> Result<Vec<MatchedPair>, ParseError> {
    let mut pairs = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.trim().to_lowercase()).unwrap_or_default();
            if first == "sequence_id_1" || first == "uniprot_id_1" {
                continue;
            }
        }

        let line_num = i + 1;

        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let distance: u64 = fields[2].trim().parse().map_err(|_| {
            ParseError::InvalidFormat(format!(
                "Invalid distance on line {}: '{}'",
                line_num, fields[2]
            ))
        })?;

        pairs.push(MatchedPair::new(
            fields[0].trim(),
            fields[1].trim(),
            distance,
        ));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_text() {
        let tsv = "sequence_id_1\tsequence_id_2\tdistance
P1\tQ1\t10
P2\tQ2\t0
";
        let pairs = parse_pair_text(tsv, '\t').unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], MatchedPair::new("P1", "Q1", 10));
        assert_eq!(pairs[1].distance, 0);
    }

    #[test]
    fn test_parse_pair_text_no_header() {
        let tsv = "P1\tQ1\t10\n";
        let pairs = parse_pair_text(tsv, '\t').unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_invalid_distance_fails() {
        let tsv = "P1\tQ1\tclose\n";
        assert!(matches!(
            parse_pair_text(tsv, '\t'),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_pair_table() {
        let pairs = parse_pair_text("sequence_id_1\tsequence_id_2\tdistance\n", '\t').unwrap();
        assert!(pairs.is_empty());
    }
}
