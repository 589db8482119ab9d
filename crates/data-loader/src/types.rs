//! Core domain types for the item and rating tables.
//!
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, ItemId)
//! - Structs with public fields
//! - Owned collections that hand out borrowed views (`&[T]`, `Option<&T>`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// Identifiers are kept as the raw strings found in the input files. They are
// never parsed as numbers, so "007" and "7" are different items.

/// Identifier of a user as it appears in the ratings table
pub type UserId = String;

/// Identifier of an item (movie) as it appears in both tables
pub type ItemId = String;

// =============================================================================
// Item metadata
// =============================================================================

/// One row of the item metadata table.
///
/// The title is rebuilt from every field between the id and the tags, so a
/// title such as `Shawshank, The (1994)` survives even when it was not quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub title: String,
    /// Category tags, kept exactly as written (e.g. `Comedy|Drama`)
    pub tags: String,
}

impl ItemRecord {
    /// Iterate over the individual `|`-separated tags
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split('|').filter(|t| !t.is_empty())
    }
}

/// Item metadata keyed by id.
///
/// A later record with the same id replaces the earlier one.
#[derive(Debug, Default, Clone)]
pub struct ItemCatalog {
    pub(crate) items: HashMap<ItemId, ItemRecord>,
}

impl ItemCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, returning the record it replaced (if any)
    pub fn insert_item(&mut self, item: ItemRecord) -> Option<ItemRecord> {
        self.items.insert(item.id.clone(), item)
    }

    /// Look up an item by id
    pub fn get_item(&self, id: &str) -> Option<&ItemRecord> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all items in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &ItemRecord> {
        self.items.values()
    }
}

impl FromIterator<ItemRecord> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemRecord>>(iter: I) -> Self {
        let mut catalog = ItemCatalog::new();
        for item in iter {
            catalog.insert_item(item);
        }
        catalog
    }
}

// =============================================================================
// Ratings
// =============================================================================

/// A single rating event from a user for an item.
///
/// Duplicated (user, item) pairs are legal; every event counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f64,
}

impl RatingRecord {
    pub fn new(user_id: impl Into<UserId>, item_id: impl Into<ItemId>, rating: f64) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            rating,
        }
    }

    /// A record takes part in sampling only if both ids are present and the
    /// rating is a finite number.
    pub fn is_well_formed(&self) -> bool {
        !self.user_id.is_empty() && !self.item_id.is_empty() && self.rating.is_finite()
    }
}

/// The ratings table parsed once, in file order.
///
/// Both the aggregation pass and the partition pass read from the same
/// `RatingLog`, so they always see the records in the same order.
#[derive(Debug, Default, Clone)]
pub struct RatingLog {
    pub(crate) records: Vec<RatingRecord>,
}

impl RatingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RatingRecord) {
        self.records.push(record);
    }

    /// All records in encounter order
    ///
    /// Rust concept: `&[T]` is a slice (view into the owned vector)
    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<RatingRecord>> for RatingLog {
    fn from(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<RatingRecord> for RatingLog {
    fn from_iter<I: IntoIterator<Item = RatingRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// Both input tables loaded together
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    pub items: ItemCatalog,
    pub ratings: RatingLog,
}

impl Dataset {
    /// Get counts for debugging/validation: (items, ratings)
    pub fn counts(&self) -> (usize, usize) {
        (self.items.len(), self.ratings.len())
    }
}
