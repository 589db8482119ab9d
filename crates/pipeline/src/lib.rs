//! Pipeline for turning raw ratings into balanced training examples.
//!
//! This crate provides:
//! - RatingAggregator: global average rating per item
//! - UserPartitioner: per-user positives and scored negative candidates
//! - BalancedSampler: equal positives and negatives per user
//! - TrainingDataPipeline for composing the three
//!
//! ## Architecture
//! The pipeline processes a rating log in stages:
//! 1. Aggregate every rating into per-item averages
//! 2. Split each user's ratings at the threshold (default 4.0); below-threshold
//!    items are scored by their global average, not the user's rating
//! 3. Keep `min(positives, negatives)` of each, taking the highest-scored
//!    negatives (hard negatives)
//!
//! Nothing is random: identical input order gives identical output.
//!
//! ## Example Usage
//! ```ignore
//! use data_loader::{ParseMode, RatingLog};
//! use pipeline::{SamplingConfig, TrainingDataPipeline};
//!
//! let ratings = RatingLog::load_from_file(Path::new("data/ratings.csv"), ParseMode::Lenient)?;
//! let training_set = TrainingDataPipeline::new(SamplingConfig::default()).run(&ratings);
//! println!("{} examples", training_set.examples.len());
//! ```

pub mod config;
pub mod types;
pub mod aggregator;
pub mod partitioner;
pub mod sampler;
pub mod training_pipeline;

// Re-export main types
pub use config::SamplingConfig;
pub use types::{Label, NegativeCandidate, TrainingExample, TrainingSummary};
pub use aggregator::{ItemAverages, RatingAggregator};
pub use partitioner::{Partition, UserPartitioner};
pub use sampler::BalancedSampler;
pub use training_pipeline::{build_training_data, TrainingDataPipeline, TrainingSet};
