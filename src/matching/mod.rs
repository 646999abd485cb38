//! Genome-distance candidate generation and reciprocal-best-hit matching.
//!
//! This module implements the pairing pipeline:
//!
//! - [`genome_distance`]: Nucleotide gap between two CDS intervals
//! - [`find_candidates`]: Cartesian enumeration of cross-family pairs per shared genome
//! - [`ReciprocalMatcher`]: Mutual-nearest-neighbor selection over the candidates
//!
//! ## Pairing Algorithm
//!
//! 1. **Distance**: intervals are normalized (coordinates sorted), then the gap
//!    between disjoint intervals is returned, or `0` on overlap.
//! 2. **Candidates**: both location tables are deduplicated and partitioned by
//!    genome; every genome present in both contributes the cartesian product
//!    of its rows.
//! 3. **Reciprocal matching**: a pair survives only if each sequence is the
//!    other's minimum-distance partner. Ties on distance are broken by the
//!    partner identifier ([`TieBreak`]), never by incidental row order.
//!
//! The selection is a greedy heuristic grounded in operon proximity, not a
//! globally optimal assignment.
//!
//! ## Example
//!
//! ```rust
//! use operon_pair::{find_candidates, CdsLocation, LocationTable, ReciprocalMatcher};
//!
//! let family_1 = LocationTable::new(vec![CdsLocation::new("ENA_G1", "p1", 0, 10)]);
//! let family_2 = LocationTable::new(vec![
//!     CdsLocation::new("ENA_G1", "q1", 20, 30),
//!     CdsLocation::new("ENA_G1", "q2", 1000, 1010),
//! ]);
//!
//! let candidates = find_candidates(&family_1, &family_2);
//! let matches = ReciprocalMatcher::new().find_matches(&candidates);
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].sequence_id_2, "q1");
//! assert_eq!(matches[0].distance, 10);
//! ```

pub mod candidates;
pub mod distance;
pub mod reciprocal;

pub use candidates::find_candidates;
pub use distance::genome_distance;
pub use reciprocal::{MatcherConfig, ReciprocalMatcher, TieBreak};
