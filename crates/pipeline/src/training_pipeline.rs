//! The TrainingDataPipeline chains aggregation, partitioning and sampling.
//!
//! Every stage reads the same [`RatingLog`], so the two passes over the
//! ratings always see identical record order.

use crate::aggregator::{ItemAverages, RatingAggregator};
use crate::config::SamplingConfig;
use crate::partitioner::{Partition, UserPartitioner};
use crate::sampler::BalancedSampler;
use crate::types::{Label, TrainingExample, TrainingSummary};
use data_loader::RatingLog;
use std::collections::HashSet;
use tracing::{debug, info};

/// Result of a pipeline run
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    pub examples: Vec<TrainingExample>,
    pub summary: TrainingSummary,
}

/// Builds a balanced training set from a rating log.
///
/// ## Usage
/// ```ignore
/// let pipeline = TrainingDataPipeline::new(SamplingConfig::default());
/// let training_set = pipeline.run(&dataset.ratings);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TrainingDataPipeline {
    aggregator: RatingAggregator,
    partitioner: UserPartitioner,
    sampler: BalancedSampler,
}

impl TrainingDataPipeline {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            aggregator: RatingAggregator::new(config.precision),
            partitioner: UserPartitioner::new(config.threshold),
            sampler: BalancedSampler::new(),
        }
    }

    /// Stage 1: global average rating per item
    pub fn averages(&self, ratings: &RatingLog) -> ItemAverages {
        self.aggregator.compute_averages(ratings.records())
    }

    /// Stage 2: per-user positives and scored negative candidates
    pub fn partition(&self, ratings: &RatingLog, averages: &ItemAverages) -> Partition {
        self.partitioner.partition(ratings.records(), averages)
    }

    /// Run all stages.
    ///
    /// Aggregation finishes before partitioning starts, since every negative
    /// candidate needs its item's global average.
    pub fn run(&self, ratings: &RatingLog) -> TrainingSet {
        debug!("Aggregating {} ratings", ratings.len());
        let averages = self.averages(ratings);
        debug!("Computed averages for {} items", averages.len());

        let partition = self.partition(ratings, &averages);
        debug!("Partitioned ratings of {} users", partition.user_count());

        let examples = self.sampler.sample(&partition);
        let summary = summarize(&partition, &examples);

        info!(
            "Built {} training examples ({} positive, {} negative) for {}/{} users",
            summary.total(),
            summary.positives,
            summary.negatives,
            summary.balanced_users,
            summary.users
        );

        TrainingSet { examples, summary }
    }
}

impl Default for TrainingDataPipeline {
    fn default() -> Self {
        Self::new(SamplingConfig::default())
    }
}

/// Convenience wrapper: run the pipeline once with `config`
pub fn build_training_data(ratings: &RatingLog, config: SamplingConfig) -> Vec<TrainingExample> {
    TrainingDataPipeline::new(config).run(ratings).examples
}

fn summarize(partition: &Partition, examples: &[TrainingExample]) -> TrainingSummary {
    let positives = examples
        .iter()
        .filter(|e| e.label == Label::Positive)
        .count();
    let balanced_users: HashSet<&str> = examples.iter().map(|e| e.user_id.as_str()).collect();

    TrainingSummary {
        users: partition.user_count(),
        balanced_users: balanced_users.len(),
        positives,
        negatives: examples.len() - positives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RatingRecord;

    #[test]
    fn test_empty_log() {
        let training_set = TrainingDataPipeline::default().run(&RatingLog::new());
        assert!(training_set.examples.is_empty());
        assert_eq!(training_set.summary, TrainingSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let log: RatingLog = vec![
            RatingRecord::new("1", "a", 5.0),
            RatingRecord::new("1", "b", 1.0),
            RatingRecord::new("2", "a", 4.0),
            RatingRecord::new("3", "b", 2.0),
        ]
        .into();

        let training_set = TrainingDataPipeline::default().run(&log);
        assert_eq!(
            training_set.summary,
            TrainingSummary {
                users: 3,
                balanced_users: 1,
                positives: 1,
                negatives: 1,
            }
        );
    }

    #[test]
    fn test_threshold_from_config() {
        let log: RatingLog = vec![
            RatingRecord::new("1", "a", 3.0),
            RatingRecord::new("1", "b", 2.0),
        ]
        .into();

        assert!(build_training_data(&log, SamplingConfig::default()).is_empty());

        let examples = build_training_data(&log, SamplingConfig::default().with_threshold(3.0));
        assert_eq!(
            examples,
            vec![
                TrainingExample::positive("1", "a"),
                TrainingExample::negative("1", "b"),
            ]
        );
    }
}
