//! Rating collection for a single generation.

use super::value_objects::{Classification, RaterId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What recording a rating did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingChange {
    /// The rater already held exactly this classification
    Unchanged,
    /// First rating from this rater
    Added,
    /// The rater replaced an earlier, different classification
    Overwritten { previous: Classification },
}

impl RatingChange {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, RatingChange::Unchanged)
    }
}

/// Ratings keyed by rater, one classification per rater.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ratings(BTreeMap<RaterId, Classification>);

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `classification` for `rater`, replacing any earlier value.
    pub fn record(&mut self, rater: RaterId, classification: Classification) -> RatingChange {
        match self.0.insert(rater, classification) {
            None => RatingChange::Added,
            Some(previous) if previous == classification => RatingChange::Unchanged,
            Some(previous) => RatingChange::Overwritten { previous },
        }
    }

    pub fn get(&self, rater: &RaterId) -> Option<Classification> {
        self.0.get(rater).copied()
    }

    /// Number of distinct raters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RaterId, &Classification)> {
        self.0.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = Classification> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(RaterId, Classification)> for Ratings {
    fn from_iter<I: IntoIterator<Item = (RaterId, Classification)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
