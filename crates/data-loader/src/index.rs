//! Loading the input tables into their in-memory indices.
//!
//! The ratings file is read exactly once into a [`RatingLog`]; everything
//! downstream works off that cached, ordered copy.

use crate::error::Result;
use crate::parser::{self, ParseMode};
use crate::types::*;
use std::path::Path;
use tracing::info;

impl ItemCatalog {
    /// Load item metadata from a CSV file.
    ///
    /// Missing file -> empty catalog.
    pub fn load_from_file(path: &Path, mode: ParseMode) -> Result<Self> {
        let items = parser::parse_items(path, mode)?;
        Ok(items.into_iter().collect())
    }
}

impl RatingLog {
    /// Load the ratings table from a CSV file, preserving row order.
    ///
    /// Missing file -> empty log.
    pub fn load_from_file(path: &Path, mode: ParseMode) -> Result<Self> {
        Ok(parser::parse_ratings(path, mode)?.into())
    }
}

impl Dataset {
    /// Load both tables.
    ///
    /// Rayon's `join` parses the two files in parallel; the rating order is
    /// unaffected because each file is still read sequentially.
    pub fn load_from_files(items_path: &Path, ratings_path: &Path, mode: ParseMode) -> Result<Self> {
        info!(
            "Loading items from {:?} and ratings from {:?}",
            items_path, ratings_path
        );

        let (items, ratings) = rayon::join(
            || ItemCatalog::load_from_file(items_path, mode),
            || RatingLog::load_from_file(ratings_path, mode),
        );

        let dataset = Dataset {
            items: items?,
            ratings: ratings?,
        };

        let (item_count, rating_count) = dataset.counts();
        info!("Loaded {} items, {} ratings", item_count, rating_count);
        Ok(dataset)
    }

    /// Load `movies.csv` and `ratings.csv` from one directory
    pub fn load_from_dir(data_dir: &Path, mode: ParseMode) -> Result<Self> {
        Self::load_from_files(
            &data_dir.join("movies.csv"),
            &data_dir.join("ratings.csv"),
            mode,
        )
    }
}
