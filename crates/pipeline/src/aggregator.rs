//! Per-item average ratings.
//!
//! One pass over the rating log accumulates `(count, sum)` per item, then
//! each item's mean is rounded to a fixed number of decimals.

use crate::config::DEFAULT_PRECISION;
use data_loader::{ItemId, RatingRecord};
use std::collections::HashMap;
use tracing::debug;

/// Running totals for one item
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ItemTally {
    count: u64,
    sum: f64,
}

/// Global average rating of every item seen in the log.
///
/// Read-only once computed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemAverages {
    averages: HashMap<ItemId, f64>,
}

impl ItemAverages {
    /// Average for an item, if it was rated at all
    pub fn get(&self, item_id: &str) -> Option<f64> {
        self.averages.get(item_id).copied()
    }

    /// Average for an item, or 0.0 for an item nobody rated
    pub fn get_or_zero(&self, item_id: &str) -> f64 {
        self.get(item_id).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, f64)> {
        self.averages.iter().map(|(id, avg)| (id, *avg))
    }
}

impl FromIterator<(ItemId, f64)> for ItemAverages {
    fn from_iter<I: IntoIterator<Item = (ItemId, f64)>>(iter: I) -> Self {
        Self {
            averages: iter.into_iter().collect(),
        }
    }
}

/// Computes [`ItemAverages`] from a sequence of ratings.
#[derive(Debug, Clone, Copy)]
pub struct RatingAggregator {
    precision: u32,
}

impl RatingAggregator {
    /// # Arguments
    /// * `precision` - Decimal digits kept in each average (typically 3)
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Mean rating per item, rounded to `precision` decimals.
    ///
    /// Records with an empty id or a non-finite rating are skipped.
    pub fn compute_averages(&self, ratings: &[RatingRecord]) -> ItemAverages {
        let mut tallies: HashMap<&str, ItemTally> = HashMap::new();
        let mut skipped = 0usize;

        for record in ratings {
            if !record.is_well_formed() {
                skipped += 1;
                continue;
            }
            let tally = tallies.entry(record.item_id.as_str()).or_default();
            tally.count += 1;
            tally.sum += record.rating;
        }

        debug!(
            "Aggregated {} items from {} ratings ({} skipped)",
            tallies.len(),
            ratings.len(),
            skipped
        );

        tallies
            .into_iter()
            .map(|(item_id, tally)| {
                let mean = tally.sum / tally.count as f64;
                (item_id.to_string(), round_to(mean, self.precision))
            })
            .collect()
    }
}

impl Default for RatingAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

/// Round to `digits` decimals, exact halves going to the even neighbour
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user: &str, item: &str, value: f64) -> RatingRecord {
        RatingRecord::new(user, item, value)
    }

    #[test]
    fn test_average_of_three_ratings() {
        let ratings = vec![rating("1", "x", 3.0), rating("2", "x", 4.0), rating("3", "x", 5.0)];
        let averages = RatingAggregator::default().compute_averages(&ratings);

        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get("x"), Some(4.0));
    }

    #[test]
    fn test_rounds_to_three_decimals() {
        let ratings = vec![rating("1", "y", 1.0), rating("2", "y", 2.0), rating("3", "y", 2.0)];
        let averages = RatingAggregator::default().compute_averages(&ratings);
        assert_eq!(averages.get("y"), Some(1.667));

        let ratings = vec![rating("1", "z", 4.0), rating("2", "z", 4.5), rating("3", "z", 5.0)];
        let averages = RatingAggregator::new(1).compute_averages(&ratings);
        assert_eq!(averages.get("z"), Some(4.5));
    }

    #[test]
    fn test_exact_half_rounds_to_even() {
        // 16.5 / 8 == 2.0625 exactly
        let mut ratings = vec![rating("0", "x", 2.5)];
        ratings.extend((1..8).map(|u| rating(&u.to_string(), "x", 2.0)));
        let averages = RatingAggregator::default().compute_averages(&ratings);
        assert_eq!(averages.get("x"), Some(2.062));

        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn test_duplicates_are_counted() {
        let ratings = vec![rating("1", "a", 5.0), rating("1", "a", 5.0), rating("2", "a", 2.0)];
        let averages = RatingAggregator::default().compute_averages(&ratings);
        assert_eq!(averages.get("a"), Some(4.0));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let ratings = vec![
            rating("1", "a", 4.0),
            rating("", "a", 1.0),
            rating("2", "", 1.0),
            rating("3", "a", f64::NAN),
        ];
        let averages = RatingAggregator::default().compute_averages(&ratings);

        assert_eq!(averages.len(), 1);
        assert_eq!(averages.get("a"), Some(4.0));
    }

    #[test]
    fn test_empty_input() {
        let averages = RatingAggregator::default().compute_averages(&[]);
        assert!(averages.is_empty());
        assert_eq!(averages.get_or_zero("anything"), 0.0);
    }

    #[test]
    fn test_order_independent() {
        let mut ratings = vec![
            rating("1", "a", 1.0),
            rating("2", "b", 3.5),
            rating("3", "a", 4.0),
            rating("4", "b", 2.0),
        ];
        let forward = RatingAggregator::default().compute_averages(&ratings);
        ratings.reverse();
        let backward = RatingAggregator::default().compute_averages(&ratings);
        assert_eq!(forward, backward);
    }
}
