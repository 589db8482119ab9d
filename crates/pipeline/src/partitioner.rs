//! Splitting each user's ratings into positives and negative candidates.

use crate::aggregator::ItemAverages;
use crate::config::DEFAULT_THRESHOLD;
use crate::types::NegativeCandidate;
use data_loader::{ItemId, RatingRecord, UserId};
use indexmap::IndexMap;
use tracing::debug;

/// Per-user positives and negative candidates.
///
/// Both maps iterate users in the order of their first rating in the log,
/// and every user appears in both (possibly with an empty list). Within a
/// user, items keep their encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub positives: IndexMap<UserId, Vec<ItemId>>,
    pub negatives: IndexMap<UserId, Vec<NegativeCandidate>>,
}

impl Partition {
    /// Number of distinct users
    pub fn user_count(&self) -> usize {
        self.positives.len()
    }

    pub fn positives_of(&self, user_id: &str) -> &[ItemId] {
        self.positives
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn negatives_of(&self, user_id: &str) -> &[NegativeCandidate] {
        self.negatives
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// Labels each rating against a fixed threshold.
///
/// ## Algorithm
/// For each well-formed rating, in log order:
/// 1. `rating >= threshold` -> the item goes to the user's positives
/// 2. otherwise -> the item goes to the user's negative candidates, scored by
///    the item's global average (0.0 if the item has none)
///
/// Scoring by the global average makes the sampler prefer items most people
/// liked but this user did not (hard negatives).
#[derive(Debug, Clone, Copy)]
pub struct UserPartitioner {
    threshold: f64,
}

impl UserPartitioner {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn partition(&self, ratings: &[RatingRecord], averages: &ItemAverages) -> Partition {
        let mut partition = Partition::default();

        for record in ratings.iter().filter(|r| r.is_well_formed()) {
            // Register the user in both maps so they share first-appearance order
            let positives = partition
                .positives
                .entry(record.user_id.clone())
                .or_default();
            let negatives = partition
                .negatives
                .entry(record.user_id.clone())
                .or_default();

            if record.rating >= self.threshold {
                positives.push(record.item_id.clone());
            } else {
                negatives.push(NegativeCandidate::new(
                    record.item_id.clone(),
                    averages.get_or_zero(&record.item_id),
                ));
            }
        }

        debug!(
            "Partitioned {} ratings into {} users at threshold {}",
            ratings.len(),
            partition.user_count(),
            self.threshold
        );
        partition
    }
}

impl Default for UserPartitioner {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
