//! # Data Loader Crate
//!
//! This crate reads the two input tables used to build training data:
//! item metadata (`movies.csv`) and user ratings (`ratings.csv`).
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ItemRecord, RatingRecord, ItemCatalog, RatingLog)
//! - **parser**: Parse CSV files into Rust structs
//! - **index**: Load files into the in-memory catalog and rating log
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, ParseMode};
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_dir(Path::new("data"), ParseMode::Lenient)?;
//! let item = dataset.items.get_item("1").unwrap();
//! println!("{} has {} ratings in total", item.title, dataset.ratings.len());
//! ```
//!
//! Missing files are not an error: they load as empty tables.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::ParseMode;
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    // Core types
    ItemRecord,
    RatingRecord,
    ItemCatalog,
    RatingLog,
    Dataset,
};
