//! Distance distribution reporting over the matched-pair table.
//!
//! The core always hands the reporting boundary a well-formed (possibly
//! empty) distance list; rejecting an empty list is this component's job,
//! surfaced as the distinct [`ReportError::NoData`] rather than an empty
//! artifact.

use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::core::pair::MatchedPair;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No valid distances provided")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cumulative distribution of genome distances across matched pairs.
#[derive(Debug, Clone)]
pub struct DistanceDistribution {
    /// Matched distances, sorted ascending
    distances: Vec<u64>,
}

impl DistanceDistribution {
    /// Build the distribution from matched pairs.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoData` when there are no pairs to summarize.
    pub fn from_pairs(pairs: &[MatchedPair]) -> Result<Self, ReportError> {
        Self::from_distances(pairs.iter().map(|p| p.distance).collect())
    }

    /// Build the distribution from a raw distance list.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoData` when the list is empty.
    pub fn from_distances(mut distances: Vec<u64>) -> Result<Self, ReportError> {
        if distances.is_empty() {
            return Err(ReportError::NoData);
        }
        distances.sort_unstable();
        Ok(Self { distances })
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        self.distances[0]
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.distances[self.distances.len() - 1]
    }

    /// Median matched distance (lower of the two middle values for an even
    /// count)
    #[must_use]
    pub fn median(&self) -> u64 {
        self.distances[(self.distances.len() - 1) / 2]
    }

    /// Sorted distances with their cumulative sequence counts, the tabular
    /// analogue of a cumulative distribution plot.
    pub fn cumulative(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .map(|(i, &d)| (d, i + 1))
    }

    /// Write the distribution as a two-column TSV (`distance`,
    /// `cumulative_sequences`).
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Io` if the destination cannot be written.
    pub fn write_tsv(&self, path: &Path) -> Result<(), ReportError> {
        let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
        writeln!(out, "distance\tcumulative_sequences")?;
        for (distance, count) in self.cumulative() {
            writeln!(out, "{distance}\t{count}")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(distances: &[u64]) -> Vec<MatchedPair> {
        distances
            .iter()
            .enumerate()
            .map(|(i, &d)| MatchedPair::new(format!("p{i}"), format!("q{i}"), d))
            .collect()
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = DistanceDistribution::from_pairs(&[]).unwrap_err();
        assert!(matches!(err, ReportError::NoData));
    }

    #[test]
    fn test_distances_are_sorted() {
        let dist = DistanceDistribution::from_pairs(&pairs(&[500, 0, 42])).unwrap();
        let table: Vec<(u64, usize)> = dist.cumulative().collect();
        assert_eq!(table, vec![(0, 1), (42, 2), (500, 3)]);
    }

    #[test]
    fn test_summary_statistics() {
        let dist = DistanceDistribution::from_pairs(&pairs(&[500, 0, 42, 7])).unwrap();
        assert_eq!(dist.count(), 4);
        assert_eq!(dist.min(), 0);
        assert_eq!(dist.max(), 500);
        assert_eq!(dist.median(), 7);
    }

    #[test]
    fn test_single_distance() {
        let dist = DistanceDistribution::from_distances(vec![12]).unwrap();
        assert_eq!(dist.min(), 12);
        assert_eq!(dist.max(), 12);
        assert_eq!(dist.median(), 12);
    }

    #[test]
    fn test_write_tsv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("distribution.tsv");

        let dist = DistanceDistribution::from_distances(vec![10, 3]).unwrap();
        dist.write_tsv(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "distance\tcumulative_sequences\n3\t1\n10\t2\n");
    }
}
