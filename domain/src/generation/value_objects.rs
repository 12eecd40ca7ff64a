//! Generation value objects - identifiers and rating values.
//!
//! # Identifiers
//! - [`GenerationId`] - Unique identifier for a generation, shared by both pools
//! - [`RaterId`] - Opaque client identifier supplied by the rater
//!
//! # Classification
//! - [`Classification`] - Small non-negative rating value, `0` means disliked
//!
//! # Demand accounting
//! - [`PairKey`] - The (subject, category) bucket a generation belongs to

use serde::{Deserialize, Serialize};

/// Unique identifier for a generation.
///
/// Ids arriving from clients are kept verbatim; ids minted by the demand
/// scheduler are UUID v4 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationId(String);

impl GenerationId {
    /// Creates a GenerationId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a new random GenerationId.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for GenerationId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for GenerationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of a rating client.
///
/// Not authenticated; one rater holds at most one rating per generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaterId(String);

impl RaterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for RaterId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for RaterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rater's classification of a generation.
///
/// Values other than [`Classification::DISLIKED`] are opaque categories
/// chosen by the client; only equality and the disliked sentinel matter here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Classification(u32);

impl Classification {
    /// The reserved "player disliked this" value.
    pub const DISLIKED: Classification = Classification(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_disliked(&self) -> bool {
        *self == Self::DISLIKED
    }
}

impl From<u32> for Classification {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Classification)
            .map_err(|_| format!("'{}' is not a non-negative integer", s))
    }
}

/// The (subject, category) bucket used for deficit accounting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub subject: String,
    pub category: String,
}

impl PairKey {
    pub fn new(subject: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            category: category.into(),
        }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.subject, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = GenerationId::generate();
        let b = GenerationId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_classification_parse() {
        assert_eq!("3".parse::<Classification>(), Ok(Classification::new(3)));
        assert_eq!(" 0 ".parse::<Classification>(), Ok(Classification::DISLIKED));
        assert!("-1".parse::<Classification>().is_err());
        assert!("liked".parse::<Classification>().is_err());
        assert!("1.5".parse::<Classification>().is_err());
    }

    #[test]
    fn test_disliked_sentinel() {
        assert!(Classification::new(0).is_disliked());
        assert!(!Classification::new(2).is_disliked());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = GenerationId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        let c: Classification = serde_json::from_str("4").unwrap();
        assert_eq!(c.value(), 4);
    }

    #[test]
    fn test_pair_key_display() {
        assert_eq!(PairKey::new("The Cellar", "story").to_string(), "The Cellar/story");
    }
}
