//! Reciprocal-best-hit selection over the candidate table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::pair::{CandidatePair, MatchedPair};

/// Secondary sort key used when several candidate rows share the minimum
/// distance.
///
/// Minimum-distance selection must not depend on incidental row order, so
/// ties are resolved on the partner identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the lexicographically smallest partner identifier
    #[default]
    PartnerIdAsc,
    /// Prefer the lexicographically largest partner identifier
    PartnerIdDesc,
}

/// Configuration for the reciprocal matcher
#[derive(Debug, Clone, Default)]
pub struct MatcherConfig {
    pub tie_break: TieBreak,
}

/// Selects candidate pairs where both sequences are closest on the genome to
/// each other.
///
/// This is a greedy mutual-nearest-neighbor heuristic, not a minimum-cost
/// bipartite assignment: downstream covariation analysis assumes exactly this
/// selection, so it must not be "improved" into a global optimum.
pub struct ReciprocalMatcher {
    config: MatcherConfig,
}

impl Default for ReciprocalMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReciprocalMatcher {
    /// Create a matcher with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom configuration
    #[must_use]
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Find all reciprocal best hits in the candidate table.
    ///
    /// For each distinct `sequence_id_1`, its minimum-distance partner `b` is
    /// looked up; the pair is emitted only if `b`'s own minimum-distance
    /// partner is the original sequence. Output is ordered by
    /// `sequence_id_1`; an empty candidate table yields an empty result.
    ///
    /// With a fixed tie-break the reverse lookup for a given `b` always
    /// selects the same partner, so every `sequence_id_2` is claimed by at
    /// most one `sequence_id_1`.
    #[must_use]
    pub fn find_matches(&self, candidates: &[CandidatePair]) -> Vec<MatchedPair> {
        let by_id_1 = group_by(candidates, |c| c.sequence_id_1.as_str());
        let by_id_2 = group_by(candidates, |c| c.sequence_id_2.as_str());

        // sorted iteration keeps the output deterministic
        let mut ids_1: Vec<&str> = by_id_1.keys().copied().collect();
        ids_1.sort_unstable();

        let mut matches = Vec::new();
        for sequence_id_1 in ids_1 {
            let subset_1 = &by_id_1[sequence_id_1];

            // closest sequence in the second alignment, w.r.t. genome distance
            let Some(best_forward) = self.closest(subset_1, |c| c.sequence_id_2.as_str()) else {
                continue;
            };
            let closest_to_1 = best_forward.sequence_id_2.as_str();

            // closest sequence in the first alignment to that hit
            let Some(subset_2) = by_id_2.get(closest_to_1) else {
                continue;
            };
            let Some(best_reverse) = self.closest(subset_2, |c| c.sequence_id_1.as_str()) else {
                continue;
            };

            // keep only if reciprocally the closest
            if best_reverse.sequence_id_1 == sequence_id_1 {
                matches.push(MatchedPair::new(
                    sequence_id_1,
                    closest_to_1,
                    best_forward.distance,
                ));
            }
        }

        debug!(
            candidates = candidates.len(),
            matches = matches.len(),
            "selected reciprocal best hits"
        );
        matches
    }

    /// Minimum-distance row within a group, ties resolved on the partner key.
    fn closest<'a>(
        &self,
        rows: &[&'a CandidatePair],
        partner: impl Fn(&CandidatePair) -> &str,
    ) -> Option<&'a CandidatePair> {
        rows.iter().copied().min_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| match self.config.tie_break {
                    TieBreak::PartnerIdAsc => partner(a).cmp(partner(b)),
                    TieBreak::PartnerIdDesc => partner(b).cmp(partner(a)),
                })
        })
    }
}

fn group_by<'a>(
    candidates: &'a [CandidatePair],
    key: impl Fn(&CandidatePair) -> &str,
) -> HashMap<&'a str, Vec<&'a CandidatePair>> {
    let mut groups: HashMap<&str, Vec<&CandidatePair>> = HashMap::new();
    for candidate in candidates {
        groups
            .entry(key(candidate))
            .or_default()
            .push(candidate);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_reciprocal_pair() {
        // p1 is closest to q1 and vice versa; q2 is far away with no other partner
        let candidates = vec![
            CandidatePair::new("p1", "q1", 10),
            CandidatePair::new("p1", "q2", 990),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);
        assert_eq!(matches, vec![MatchedPair::new("p1", "q1", 10)]);
    }

    #[test]
    fn test_non_reciprocal_discarded() {
        // p1's closest is q1, but q1 is closer to p2
        let candidates = vec![
            CandidatePair::new("p1", "q1", 50),
            CandidatePair::new("p2", "q1", 10),
            CandidatePair::new("p2", "q2", 400),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);
        assert_eq!(matches, vec![MatchedPair::new("p2", "q1", 10)]);
    }

    #[test]
    fn test_empty_candidates() {
        let matches = ReciprocalMatcher::new().find_matches(&[]);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_reciprocity_invariant() {
        let candidates = vec![
            CandidatePair::new("p1", "q1", 30),
            CandidatePair::new("p1", "q2", 5),
            CandidatePair::new("p2", "q1", 12),
            CandidatePair::new("p2", "q2", 80),
            CandidatePair::new("p3", "q3", 0),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);

        for m in &matches {
            let min_for_1 = candidates
                .iter()
                .filter(|c| c.sequence_id_1 == m.sequence_id_1)
                .map(|c| c.distance)
                .min()
                .unwrap();
            let min_for_2 = candidates
                .iter()
                .filter(|c| c.sequence_id_2 == m.sequence_id_2)
                .map(|c| c.distance)
                .min()
                .unwrap();
            assert_eq!(m.distance, min_for_1);
            assert_eq!(m.distance, min_for_2);
        }

        assert_eq!(
            matches,
            vec![
                MatchedPair::new("p1", "q2", 5),
                MatchedPair::new("p2", "q1", 12),
                MatchedPair::new("p3", "q3", 0),
            ]
        );
    }

    #[test]
    fn test_tie_break_ascending_default() {
        // q1 and q2 are equidistant from p1; ascending picks q1
        let candidates = vec![
            CandidatePair::new("p1", "q2", 10),
            CandidatePair::new("p1", "q1", 10),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);
        assert_eq!(matches, vec![MatchedPair::new("p1", "q1", 10)]);
    }

    #[test]
    fn test_tie_break_descending() {
        let candidates = vec![
            CandidatePair::new("p1", "q2", 10),
            CandidatePair::new("p1", "q1", 10),
        ];

        let matcher = ReciprocalMatcher::with_config(MatcherConfig {
            tie_break: TieBreak::PartnerIdDesc,
        });
        let matches = matcher.find_matches(&candidates);
        assert_eq!(matches, vec![MatchedPair::new("p1", "q2", 10)]);
    }

    #[test]
    fn test_tie_break_independent_of_row_order() {
        let mut candidates = vec![
            CandidatePair::new("p1", "q1", 10),
            CandidatePair::new("p1", "q2", 10),
        ];

        let forward = ReciprocalMatcher::new().find_matches(&candidates);
        candidates.reverse();
        let reversed = ReciprocalMatcher::new().find_matches(&candidates);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_partner_claimed_at_most_once() {
        // p1 and p2 both have q1 as their nearest partner; only the one q1
        // reciprocates for survives
        let candidates = vec![
            CandidatePair::new("p1", "q1", 5),
            CandidatePair::new("p2", "q1", 7),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);
        assert_eq!(matches, vec![MatchedPair::new("p1", "q1", 5)]);

        let claimed: Vec<&str> = matches.iter().map(|m| m.sequence_id_2.as_str()).collect();
        let mut deduped = claimed.clone();
        deduped.dedup();
        assert_eq!(claimed, deduped);
    }

    #[test]
    fn test_idempotent_on_tie_free_input() {
        let candidates = vec![
            CandidatePair::new("p1", "q1", 3),
            CandidatePair::new("p1", "q2", 40),
            CandidatePair::new("p2", "q2", 8),
        ];

        let matcher = ReciprocalMatcher::new();
        let first = matcher.find_matches(&candidates);
        let second = matcher.find_matches(&candidates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_ordered_by_first_id() {
        let candidates = vec![
            CandidatePair::new("p9", "q9", 1),
            CandidatePair::new("p1", "q1", 1),
            CandidatePair::new("p5", "q5", 1),
        ];

        let matches = ReciprocalMatcher::new().find_matches(&candidates);
        let ids: Vec<&str> = matches.iter().map(|m| m.sequence_id_1.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p5", "p9"]);
    }
}
