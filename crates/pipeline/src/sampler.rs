//! Balancing positives and negatives per user.

use crate::partitioner::Partition;
use crate::types::{NegativeCandidate, TrainingExample};
use data_loader::ItemId;
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Downsamples each user to equal numbers of positive and negative examples.
///
/// ## Algorithm
/// For each user, in partition order:
/// 1. `k = min(positives, negative candidates)`; if `k == 0` the user is dropped
/// 2. Emit the first `k` positives in encounter order
/// 3. Stable-sort the negative candidates by score, highest first, and emit
///    the first `k`
///
/// Users are processed in parallel; the indexed collect keeps the output in
/// the same order a sequential run would produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedSampler;

impl BalancedSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn sample(&self, partition: &Partition) -> Vec<TrainingExample> {
        let users: Vec<(&String, &Vec<ItemId>)> = partition.positives.iter().collect();

        let per_user: Vec<Vec<TrainingExample>> = users
            .par_iter()
            .map(|(user_id, positives)| {
                sample_user(user_id, positives, partition.negatives_of(user_id))
            })
            .collect();

        let dropped = per_user.iter().filter(|examples| examples.is_empty()).count();
        debug!(
            "Sampled {} users ({} without a balanced pair)",
            per_user.len(),
            dropped
        );

        per_user.into_iter().flatten().collect()
    }
}

fn sample_user(
    user_id: &str,
    positives: &[ItemId],
    negatives: &[NegativeCandidate],
) -> Vec<TrainingExample> {
    let k = positives.len().min(negatives.len());
    if k == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&NegativeCandidate> = negatives.iter().collect();
    // `sort_by` is stable: equal scores (0.0 and -0.0 included) keep their
    // encounter order
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut examples = Vec::with_capacity(2 * k);
    examples.extend(
        positives
            .iter()
            .take(k)
            .map(|item_id| TrainingExample::positive(user_id, item_id.as_str())),
    );
    examples.extend(
        ranked
            .into_iter()
            .take(k)
            .map(|candidate| TrainingExample::negative(user_id, candidate.item_id.as_str())),
    );
    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Label;
    use indexmap::IndexMap;

    fn partition(users: Vec<(&str, Vec<&str>, Vec<(&str, f64)>)>) -> Partition {
        let mut positives: IndexMap<String, Vec<ItemId>> = IndexMap::new();
        let mut negatives: IndexMap<String, Vec<NegativeCandidate>> = IndexMap::new();
        for (user, pos, neg) in users {
            positives.insert(
                user.to_string(),
                pos.into_iter().map(String::from).collect(),
            );
            negatives.insert(
                user.to_string(),
                neg.into_iter()
                    .map(|(item, score)| NegativeCandidate::new(item, score))
                    .collect(),
            );
        }
        Partition {
            positives,
            negatives,
        }
    }

    #[test]
    fn test_picks_highest_scored_negative() {
        let p = partition(vec![("u1", vec!["i1"], vec![("i2", 3.0), ("i3", 2.5)])]);
        let examples = BalancedSampler::new().sample(&p);

        assert_eq!(
            examples,
            vec![
                TrainingExample::positive("u1", "i1"),
                TrainingExample::negative("u1", "i2"),
            ]
        );
    }

    #[test]
    fn test_truncates_positives_to_negative_count() {
        let p = partition(vec![("u", vec!["a", "b", "c"], vec![("x", 1.0)])]);
        let examples = BalancedSampler::new().sample(&p);

        assert_eq!(
            examples,
            vec![
                TrainingExample::positive("u", "a"),
                TrainingExample::negative("u", "x"),
            ]
        );
    }

    #[test]
    fn test_ties_keep_encounter_order() {
        let p = partition(vec![(
            "u",
            vec!["p1", "p2"],
            vec![("n1", 3.0), ("n2", 4.0), ("n3", 3.0), ("n4", 3.0)],
        )]);
        let examples = BalancedSampler::new().sample(&p);

        let negatives: Vec<&str> = examples
            .iter()
            .filter(|e| e.label == Label::Negative)
            .map(|e| e.item_id.as_str())
            .collect();
        assert_eq!(negatives, vec!["n2", "n1"]);
    }

    #[test]
    fn test_signed_zero_scores_are_ties() {
        let p = partition(vec![(
            "u",
            vec!["p1", "p2"],
            vec![("n1", -0.0), ("n2", 0.0), ("n3", -1.0)],
        )]);
        let examples = BalancedSampler::new().sample(&p);

        let negatives: Vec<&str> = examples
            .iter()
            .filter(|e| e.label == Label::Negative)
            .map(|e| e.item_id.as_str())
            .collect();
        assert_eq!(negatives, vec!["n1", "n2"]);
    }

    #[test]
    fn test_users_without_pairs_are_dropped() {
        let p = partition(vec![
            ("no_neg", vec!["a"], vec![]),
            ("no_pos", vec![], vec![("b", 4.0)]),
            ("ok", vec!["c"], vec![("d", 2.0)]),
        ]);
        let examples = BalancedSampler::new().sample(&p);

        assert_eq!(examples.len(), 2);
        assert!(examples.iter().all(|e| e.user_id == "ok"));
    }

    #[test]
    fn test_missing_negative_entry_counts_as_empty() {
        let mut p = partition(vec![("u", vec!["a"], vec![("b", 1.0)])]);
        p.negatives.clear();
        assert!(BalancedSampler::new().sample(&p).is_empty());
    }

    #[test]
    fn test_output_grouped_by_user_in_partition_order() {
        let p = partition(vec![
            ("u2", vec!["a"], vec![("b", 1.0)]),
            ("u1", vec!["c", "d"], vec![("e", 1.0), ("f", 2.0)]),
        ]);
        let examples = BalancedSampler::new().sample(&p);

        let rendered: Vec<String> = examples.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "(u2, a, 1)",
                "(u2, b, 0)",
                "(u1, c, 1)",
                "(u1, d, 1)",
                "(u1, f, 0)",
                "(u1, e, 0)",
            ]
        );
    }
}
