use serde::{Deserialize, Serialize};

/// One enumerated cross-family pairing: a sequence from each family found in
/// the same genome, with the nucleotide distance between their CDS intervals.
///
/// The same `sequence_id_1` appears once per family-2 row in that genome, and
/// may repeat across genomes when paralogous rows survive deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePair {
    pub sequence_id_1: String,
    pub sequence_id_2: String,

    /// Nucleotide gap between the two CDS intervals; zero when they overlap
    pub distance: u64,
}

impl CandidatePair {
    pub fn new(
        sequence_id_1: impl Into<String>,
        sequence_id_2: impl Into<String>,
        distance: u64,
    ) -> Self {
        Self {
            sequence_id_1: sequence_id_1.into(),
            sequence_id_2: sequence_id_2.into(),
            distance,
        }
    }
}

/// A reciprocal best hit: each side is the other's minimum-distance partner
/// in the candidate table.
///
/// Computed once per matching run and handed straight to the concatenation
/// and reporting collaborators; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPair {
    pub sequence_id_1: String,
    pub sequence_id_2: String,
    pub distance: u64,
}

impl MatchedPair {
    pub fn new(
        sequence_id_1: impl Into<String>,
        sequence_id_2: impl Into<String>,
        distance: u64,
    ) -> Self {
        Self {
            sequence_id_1: sequence_id_1.into(),
            sequence_id_2: sequence_id_2.into(),
            distance,
        }
    }
}
