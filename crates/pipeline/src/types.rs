//! Output types of the sampling pipeline.

use data_loader::{ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary label of a training example.
///
/// Serialized as the integer `1` or `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Label {
    /// Item sampled from the user's low ratings
    Negative,
    /// User rated the item at or above the threshold
    Positive,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Negative => 0,
            Label::Positive => 1,
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> u8 {
        label.as_u8()
    }
}

impl TryFrom<u8> for Label {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Negative),
            1 => Ok(Label::Positive),
            other => Err(format!("label must be 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// One (user, item, label) row handed to the downstream classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingExample {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub label: Label,
}

impl TrainingExample {
    pub fn positive(user_id: impl Into<UserId>, item_id: impl Into<ItemId>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            label: Label::Positive,
        }
    }

    pub fn negative(user_id: impl Into<UserId>, item_id: impl Into<ItemId>) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            label: Label::Negative,
        }
    }
}

impl fmt::Display for TrainingExample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.user_id, self.item_id, self.label)
    }
}

/// An item a user rated below the threshold.
///
/// `score` is the item's global average rating, not this user's rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeCandidate {
    pub item_id: ItemId,
    pub score: f64,
}

impl NegativeCandidate {
    pub fn new(item_id: impl Into<ItemId>, score: f64) -> Self {
        Self {
            item_id: item_id.into(),
            score,
        }
    }
}

/// Counts describing a sampled training set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Users seen in the rating log
    pub users: usize,
    /// Users that contributed at least one pair of examples
    pub balanced_users: usize,
    pub positives: usize,
    pub negatives: usize,
}

impl TrainingSummary {
    pub fn total(&self) -> usize {
        self.positives + self.negatives
    }
}
