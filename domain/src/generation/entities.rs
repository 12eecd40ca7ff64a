//! Generation entity

use super::ratings::{RatingChange, Ratings};
use super::value_objects::{Classification, GenerationId, PairKey, RaterId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a generation.
///
/// ```text
/// Evaluating ──(threshold reached, consensus ok)──▶ Finalized ⟲ (more ratings)
///     │
///     └──(threshold reached, consensus disliked)──▶ Rejected (dropped)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    #[default]
    Evaluating,
    Finalized,
    Rejected,
}

impl GenerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStatus::Evaluating => "evaluating",
            GenerationStatus::Finalized => "finalized",
            GenerationStatus::Rejected => "rejected",
        }
    }

    /// Rejected generations never come back
    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationStatus::Rejected)
    }
}

impl std::fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One piece of machine-written text and the ratings it collected.
///
/// `text`, `subject`, `category` and `submitter_id` are fixed at creation.
/// Only `ratings` and `status` change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    id: GenerationId,
    text: String,
    subject: String,
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submitter_id: Option<RaterId>,
    #[serde(default)]
    ratings: Ratings,
    #[serde(default)]
    status: GenerationStatus,
}

impl Generation {
    /// Create an evaluating generation with no ratings
    pub fn new(
        id: GenerationId,
        text: impl Into<String>,
        subject: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            subject: subject.into(),
            category: category.into(),
            submitter_id: None,
            ratings: Ratings::new(),
            status: GenerationStatus::Evaluating,
        }
    }

    /// Record which client first introduced this generation
    pub fn with_submitter(mut self, submitter: RaterId) -> Self {
        self.submitter_id = Some(submitter);
        self
    }

    /// Seed previously collected ratings (used when restoring a snapshot)
    pub fn with_ratings(mut self, ratings: Ratings) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn with_status(mut self, status: GenerationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> &GenerationId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn submitter_id(&self) -> Option<&RaterId> {
        self.submitter_id.as_ref()
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey::new(self.subject.clone(), self.category.clone())
    }

    pub fn matches_pair(&self, subject: &str, category: &str) -> bool {
        self.subject == subject && self.category == category
    }

    /// Set or overwrite one rater's classification
    pub fn rate(&mut self, rater: RaterId, classification: Classification) -> RatingChange {
        self.ratings.record(rater, classification)
    }

    pub(crate) fn set_status(&mut self, status: GenerationStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Generation {
        Generation::new(GenerationId::new("g-1"), "A door opens.", "The Cellar", "story")
    }

    #[test]
    fn test_new_generation_is_evaluating() {
        let generation = sample();
        assert_eq!(generation.status(), GenerationStatus::Evaluating);
        assert!(generation.ratings().is_empty());
        assert!(generation.submitter_id().is_none());
    }

    #[test]
    fn test_rate_tracks_distinct_raters() {
        let mut generation = sample();
        generation.rate(RaterId::new("a"), Classification::new(1));
        generation.rate(RaterId::new("b"), Classification::new(1));
        generation.rate(RaterId::new("a"), Classification::new(2));

        assert_eq!(generation.ratings().len(), 2);
        assert_eq!(
            generation.ratings().get(&RaterId::new("a")),
            Some(Classification::new(2))
        );
    }

    #[test]
    fn test_pair_matching() {
        let generation = sample();
        assert!(generation.matches_pair("The Cellar", "story"));
        assert!(!generation.matches_pair("The Cellar", "flavor"));
        assert_eq!(generation.pair_key(), PairKey::new("The Cellar", "story"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GenerationStatus::Finalized.to_string(), "finalized");
        assert!(GenerationStatus::Rejected.is_terminal());
        assert!(!GenerationStatus::Finalized.is_terminal());
    }
}
