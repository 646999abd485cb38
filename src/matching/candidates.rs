//! Candidate pair enumeration across shared genomes.

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::core::location::{CdsLocation, GenomeId, LocationTable};
use crate::core::pair::CandidatePair;
use crate::matching::distance::genome_distance;

/// Enumerate every cross-family sequence pairing found in a shared genome.
///
/// Each input table is deduplicated first (annotation sources may emit the
/// same feature more than once). Both tables are then partitioned by genome;
/// for every genome present in both, the cartesian product of its rows from
/// each side is emitted with the nucleotide distance between the CDS
/// intervals. Genomes present on only one side contribute nothing.
///
/// For a genome with `n1` and `n2` rows per side the cost is `O(n1 * n2)`;
/// genomes are independent of one another and are enumerated in parallel.
/// Output order is deterministic: genomes in sorted order, rows in input
/// order within a genome.
///
/// An empty result (no shared genomes, or an input empty after filtering) is
/// valid and is returned as an empty vector, never an error.
#[must_use]
pub fn find_candidates(table_1: &LocationTable, table_2: &LocationTable) -> Vec<CandidatePair> {
    let mut table_1 = table_1.clone();
    let mut table_2 = table_2.clone();
    table_1.dedup();
    table_2.dedup();

    let groups_1 = table_1.by_genome();
    let groups_2 = table_2.by_genome();

    // genomes found in both alignments, in sorted order
    let shared: Vec<(&GenomeId, &Vec<&CdsLocation>, &Vec<&CdsLocation>)> = groups_1
        .iter()
        .filter_map(|(genome, subset_1)| {
            groups_2
                .get(genome)
                .map(|subset_2| (*genome, subset_1, subset_2))
        })
        .collect();

    debug!(
        genomes_1 = groups_1.len(),
        genomes_2 = groups_2.len(),
        shared = shared.len(),
        "partitioned location tables by genome"
    );

    // Each genome's cartesian product is independent; rayon preserves the
    // order of the sharded input on collect.
    let per_genome: Vec<Vec<CandidatePair>> = shared
        .par_iter()
        .map(|(_, subset_1, subset_2)| {
            subset_1
                .iter()
                .cartesian_product(subset_2.iter())
                .map(|(first_cds, second_cds)| {
                    CandidatePair::new(
                        first_cds.sequence_id.clone(),
                        second_cds.sequence_id.clone(),
                        genome_distance(first_cds.interval(), second_cds.interval()),
                    )
                })
                .collect()
        })
        .collect();

    let candidates: Vec<CandidatePair> = per_genome.into_iter().flatten().collect();
    debug!(candidates = candidates.len(), "enumerated candidate pairs");
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::CdsLocation;

    fn table(rows: Vec<CdsLocation>) -> LocationTable {
        LocationTable::new(rows)
    }

    #[test]
    fn test_pairs_within_shared_genome() {
        let t1 = table(vec![CdsLocation::new("G1", "p1", 0, 10)]);
        let t2 = table(vec![
            CdsLocation::new("G1", "q1", 20, 30),
            CdsLocation::new("G1", "q2", 1000, 1010),
        ]);

        let candidates = find_candidates(&t1, &t2);
        assert_eq!(
            candidates,
            vec![
                CandidatePair::new("p1", "q1", 10),
                CandidatePair::new("p1", "q2", 990),
            ]
        );
    }

    #[test]
    fn test_genome_isolation() {
        // rows from different genomes never pair
        let t1 = table(vec![CdsLocation::new("G1", "p1", 0, 10)]);
        let t2 = table(vec![CdsLocation::new("G2", "q1", 20, 30)]);

        assert!(find_candidates(&t1, &t2).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let t1 = table(vec![]);
        let t2 = table(vec![CdsLocation::new("G1", "q1", 20, 30)]);

        assert!(find_candidates(&t1, &t2).is_empty());
        assert!(find_candidates(&t2, &t1).is_empty());
        assert!(find_candidates(&t1, &t1).is_empty());
    }

    #[test]
    fn test_duplicate_rows_collapse() {
        let t1 = table(vec![
            CdsLocation::new("G1", "p1", 0, 10),
            CdsLocation::new("G1", "p1", 0, 10),
        ]);
        let t2 = table(vec![CdsLocation::new("G1", "q1", 20, 30)]);

        let candidates = find_candidates(&t1, &t2);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_cartesian_product_size() {
        let t1 = table(vec![
            CdsLocation::new("G1", "p1", 0, 10),
            CdsLocation::new("G1", "p2", 100, 110),
            CdsLocation::new("G2", "p3", 0, 10),
        ]);
        let t2 = table(vec![
            CdsLocation::new("G1", "q1", 20, 30),
            CdsLocation::new("G1", "q2", 200, 210),
            CdsLocation::new("G3", "q3", 0, 10),
        ]);

        // 2x2 in G1; G2 and G3 are unshared
        let candidates = find_candidates(&t1, &t2);
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn test_genomes_enumerated_in_sorted_order() {
        let t1 = table(vec![
            CdsLocation::new("G2", "p2", 0, 10),
            CdsLocation::new("G1", "p1", 0, 10),
        ]);
        let t2 = table(vec![
            CdsLocation::new("G2", "q2", 20, 30),
            CdsLocation::new("G1", "q1", 20, 30),
        ]);

        let candidates = find_candidates(&t1, &t2);
        assert_eq!(
            candidates,
            vec![
                CandidatePair::new("p1", "q1", 10),
                CandidatePair::new("p2", "q2", 10),
            ]
        );
    }

    #[test]
    fn test_paralogs_pair_once_per_locus() {
        // same sequence_id at two loci: both survive dedup, both pair
        let t1 = table(vec![
            CdsLocation::new("G1", "p1", 0, 10),
            CdsLocation::new("G1", "p1", 5000, 5010),
        ]);
        let t2 = table(vec![CdsLocation::new("G1", "q1", 20, 30)]);

        let candidates = find_candidates(&t1, &t2);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].distance, 10);
        assert_eq!(candidates[1].distance, 4970);
    }
}
