//! # operon-pair
//!
//! A library for pairing sequences from two protein families by genome
//! proximity.
//!
//! Interacting bacterial gene products are frequently encoded by nearby
//! genomic loci (operons). Given two monomer alignments whose sequences are
//! annotated with their originating genome and CDS coordinates, `operon-pair`
//! identifies the pairs of sequences — one from each family — that are
//! mutually the closest match on the genome (reciprocal best hits). The
//! resulting concatenation mapping feeds downstream covariation analysis.
//!
//! ## Pipeline
//!
//! 1. Parse two location tables (one row per CDS observation); rows with
//!    missing coordinates are filtered, exact duplicates dropped.
//! 2. Enumerate every cross-family pair within each shared genome, with the
//!    nucleotide distance between the coding sequences.
//! 3. Keep the pairs where each side is the other's minimum-distance partner.
//!
//! The selection is a greedy mutual-nearest-neighbor heuristic — not a
//! minimum-cost assignment — and distances are linear (circular genome
//! wraparound is not modeled).
//!
//! ## Example
//!
//! ```rust
//! use operon_pair::{find_candidates, CdsLocation, LocationTable, ReciprocalMatcher};
//!
//! let family_1 = LocationTable::new(vec![
//!     CdsLocation::new("ENA_G1", "p1", 0, 10),
//! ]);
//! let family_2 = LocationTable::new(vec![
//!     CdsLocation::new("ENA_G1", "q1", 20, 30),
//!     CdsLocation::new("ENA_G1", "q2", 1000, 1010),
//! ]);
//!
//! let candidates = find_candidates(&family_1, &family_2);
//! let matches = ReciprocalMatcher::new().find_matches(&candidates);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].sequence_id_1, "p1");
//! assert_eq!(matches[0].sequence_id_2, "q1");
//! assert_eq!(matches[0].distance, 10);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Value records: locations, candidate and matched pairs
//! - [`matching`]: Distance computation, candidate enumeration, reciprocal matching
//! - [`parsing`]: Delimited-table parsers for locations and pairs
//! - [`report`]: Distance distribution over the matched pairs
//! - [`jobs`]: Pluggable job-status tracking
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod jobs;
pub mod matching;
pub mod parsing;
pub mod report;

// Re-export commonly used types for convenience
pub use crate::core::location::{CdsLocation, GenomeId, LocationTable};
pub use crate::core::pair::{CandidatePair, MatchedPair};
pub use crate::matching::candidates::find_candidates;
pub use crate::matching::distance::genome_distance;
pub use crate::matching::reciprocal::{MatcherConfig, ReciprocalMatcher, TieBreak};
pub use crate::report::{DistanceDistribution, ReportError};
