//! Parser for the comma-separated input tables.
//!
//! This module handles:
//! - items table:   itemId,title,tags
//! - ratings table: userId,itemId,rating[,timestamp]
//!
//! Both tables start with a header row, which is skipped. Quoting follows the
//! usual CSV rules, but titles are also allowed to contain bare commas: the
//! first field is the id, the last field is the tags and everything in
//! between is glued back together as the title.
//!
//! In [`ParseMode::Lenient`] (the default) short rows and unparseable ratings
//! are dropped without an error. [`ParseMode::Strict`] reports them instead.

use crate::error::{DataLoadError, Result};
use crate::types::{ItemRecord, RatingRecord};
use csv::{ByteRecord, ReaderBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Field delimiter for both tables
pub const DELIMITER: u8 = b',';

/// Minimum number of fields an item row must carry (id, title, tags)
pub const ITEM_MIN_FIELDS: usize = 3;

/// Minimum number of fields a rating row must carry (user, item, rating)
pub const RATING_MIN_FIELDS: usize = 3;

/// How malformed rows are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Drop malformed rows silently
    #[default]
    Lenient,
    /// Fail on the first malformed row
    Strict,
}

/// Parse the item metadata file.
///
/// A path that does not exist yields an empty list rather than an error.
pub fn parse_items(path: &Path, mode: ParseMode) -> Result<Vec<ItemRecord>> {
    match open_if_exists(path)? {
        Some(file) => read_items(file, &display_name(path), mode),
        None => Ok(Vec::new()),
    }
}

/// Parse the ratings file.
///
/// A path that does not exist yields an empty list rather than an error.
pub fn parse_ratings(path: &Path, mode: ParseMode) -> Result<Vec<RatingRecord>> {
    match open_if_exists(path)? {
        Some(file) => read_ratings(file, &display_name(path), mode),
        None => Ok(Vec::new()),
    }
}

/// Read item rows from any reader. `source` is only used in messages.
pub fn read_items<R: Read>(reader: R, source: &str, mode: ParseMode) -> Result<Vec<ItemRecord>> {
    let mut csv_reader = csv_reader(reader);
    let mut items = Vec::new();
    let mut skipped = 0usize;
    let mut row = ByteRecord::new();

    while csv_reader.read_byte_record(&mut row)? {
        let line = line_of(&row);
        match item_from_row(&row, source, line) {
            Ok(item) => items.push(item),
            Err(err) if mode == ParseMode::Lenient => {
                debug!("Skipping item row: {}", err);
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!("Parsed {} items from {} ({} rows skipped)", items.len(), source, skipped);
    Ok(items)
}

/// Read rating rows from any reader. `source` is only used in messages.
pub fn read_ratings<R: Read>(
    reader: R,
    source: &str,
    mode: ParseMode,
) -> Result<Vec<RatingRecord>> {
    let mut csv_reader = csv_reader(reader);
    let mut ratings = Vec::new();
    let mut skipped = 0usize;
    let mut row = ByteRecord::new();

    while csv_reader.read_byte_record(&mut row)? {
        let line = line_of(&row);
        match rating_from_row(&row, source, line, mode) {
            Ok(rating) => ratings.push(rating),
            Err(err) if mode == ParseMode::Lenient => {
                debug!("Skipping rating row: {}", err);
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    info!("Parsed {} ratings from {} ({} rows skipped)", ratings.len(), source, skipped);
    Ok(ratings)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}

fn open_if_exists(path: &Path) -> Result<Option<File>> {
    if !path.exists() {
        warn!("Input file {} does not exist, treating it as empty", path.display());
        return Ok(None);
    }
    File::open(path)
        .map(Some)
        .map_err(|source| DataLoadError::FileOpen {
            path: path.display().to_string(),
            source,
        })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn line_of(row: &ByteRecord) -> usize {
    row.position().map(|p| p.line() as usize).unwrap_or(0)
}

/// Field as text. Bytes that are not UTF-8 are replaced rather than rejected.
fn field(row: &ByteRecord, idx: usize) -> Cow<'_, str> {
    String::from_utf8_lossy(row.get(idx).unwrap_or_default())
}

/// Build an item from a row: first field is the id, last field is the tags,
/// everything in between is the title.
fn item_from_row(row: &ByteRecord, source: &str, line: usize) -> Result<ItemRecord> {
    let found = row.len();
    if found < ITEM_MIN_FIELDS {
        return Err(DataLoadError::FieldCountMismatch {
            expected: ITEM_MIN_FIELDS,
            found,
            line,
        });
    }
    let last = found - 1;

    let title = (1..last)
        .map(|idx| field(row, idx))
        .collect::<Vec<_>>()
        .join(",");

    let id = field(row, 0).into_owned();
    if id.trim().is_empty() {
        return Err(DataLoadError::ParseError {
            file: source.to_string(),
            line,
            reason: "Missing itemId".to_string(),
        });
    }

    Ok(ItemRecord {
        id,
        title,
        tags: field(row, last).into_owned(),
    })
}

/// Build a rating from a row. Fields past the third (timestamp) are ignored.
///
/// Lenient mode lets records with empty ids through; the sampling core skips
/// them. Strict mode rejects them here.
fn rating_from_row(
    row: &ByteRecord,
    source: &str,
    line: usize,
    mode: ParseMode,
) -> Result<RatingRecord> {
    let found = row.len();
    if found < RATING_MIN_FIELDS {
        return Err(DataLoadError::FieldCountMismatch {
            expected: RATING_MIN_FIELDS,
            found,
            line,
        });
    }

    let user_id = field(row, 0).into_owned();
    let item_id = field(row, 1).into_owned();
    let rating_str = field(row, 2);

    let rating: f64 = rating_str
        .trim()
        .parse()
        .map_err(|e| DataLoadError::ParseError {
            file: source.to_string(),
            line,
            reason: format!("Invalid rating {:?}: {}", rating_str, e),
        })?;

    let record = RatingRecord {
        user_id,
        item_id,
        rating,
    };

    if mode == ParseMode::Strict && !record.is_well_formed() {
        if !record.rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: rating_str.into_owned(),
            });
        }
        return Err(DataLoadError::ParseError {
            file: source.to_string(),
            line,
            reason: "Missing userId or itemId".to_string(),
        });
    }

    Ok(record)
}
