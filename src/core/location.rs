use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identifier of a source genome (ENA/EMBL accession, contig, or plasmid)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenomeId(pub String);

impl GenomeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for GenomeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One CDS observation: where a family member's coding sequence sits in a genome.
///
/// Coordinates are unordered: `end` is numerically less than `start` when the
/// feature lies on the reverse strand. Rows with a missing coordinate never
/// reach this type; they are dropped at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CdsLocation {
    /// Genome the CDS was annotated on
    pub genome_id: GenomeId,

    /// Sequence identifier within its family (not assumed globally unique)
    pub sequence_id: String,

    /// Genomic coordinate of one end of the CDS
    pub start: u64,

    /// Genomic coordinate of the other end of the CDS
    pub end: u64,
}

impl CdsLocation {
    pub fn new(
        genome_id: impl Into<String>,
        sequence_id: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Self {
        Self {
            genome_id: GenomeId::new(genome_id),
            sequence_id: sequence_id.into(),
            start,
            end,
        }
    }

    /// The CDS interval as an unordered coordinate pair
    #[must_use]
    pub fn interval(&self) -> (u64, u64) {
        (self.start, self.end)
    }
}

/// A location table for one monomer alignment: one row per sequence-genome
/// association.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationTable {
    pub rows: Vec<CdsLocation>,
}

impl LocationTable {
    #[must_use]
    pub fn new(rows: Vec<CdsLocation>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop exact-duplicate rows, keeping first occurrence.
    ///
    /// CDS annotation sources may emit the same feature multiple times;
    /// duplicates would inflate the candidate cartesian product.
    pub fn dedup(&mut self) {
        let mut seen: HashSet<CdsLocation> = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Group rows by genome, in sorted genome order.
    ///
    /// Sorted keys keep downstream enumeration deterministic regardless of
    /// input row order.
    #[must_use]
    pub fn by_genome(&self) -> BTreeMap<&GenomeId, Vec<&CdsLocation>> {
        let mut groups: BTreeMap<&GenomeId, Vec<&CdsLocation>> = BTreeMap::new();
        for row in &self.rows {
            groups.entry(&row.genome_id).or_default().push(row);
        }
        groups
    }
}
