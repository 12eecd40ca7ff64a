//! Prompt catalog: which pairs the scheduler keeps stocked, and with what prompts.

use super::template::PromptTemplate;
use crate::generation::value_objects::PairKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `subject -> category -> [prompt template]`
///
/// Loaded once at startup and read-only afterwards.
///
/// # Example
///
/// ```
/// use genpool_domain::prompt::{PromptCatalog, PromptTemplate};
///
/// let mut catalog = PromptCatalog::new();
/// catalog.add("The Cellar", "story", PromptTemplate::new("Describe {subject}"));
///
/// assert_eq!(catalog.pair_count(), 1);
/// assert_eq!(catalog.prompts("The Cellar", "story").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptCatalog(BTreeMap<String, BTreeMap<String, Vec<PromptTemplate>>>);

impl PromptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one prompt under (subject, category)
    pub fn add(
        &mut self,
        subject: impl Into<String>,
        category: impl Into<String>,
        prompt: PromptTemplate,
    ) {
        self.0
            .entry(subject.into())
            .or_default()
            .entry(category.into())
            .or_default()
            .push(prompt);
    }

    /// Register a pair with no prompts yet
    pub fn add_category(&mut self, subject: impl Into<String>, category: impl Into<String>) {
        self.0
            .entry(subject.into())
            .or_default()
            .entry(category.into())
            .or_default();
    }

    /// Prompts for a pair (empty when the pair is unknown)
    pub fn prompts(&self, subject: &str, category: &str) -> &[PromptTemplate] {
        self.0
            .get(subject)
            .and_then(|categories| categories.get(category))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every pair with its prompts, subjects then categories in sorted order
    pub fn pairs(&self) -> impl Iterator<Item = (PairKey, &[PromptTemplate])> {
        self.0.iter().flat_map(|(subject, categories)| {
            categories
                .iter()
                .map(move |(category, prompts)| (PairKey::new(subject, category), prompts.as_slice()))
        })
    }

    pub fn pair_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pair_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested_map() {
        let json = r#"{
            "The Cellar": {"story": ["a", "b"], "flavor": []},
            "Attic": {"story": ["c"]}
        }"#;
        let catalog: PromptCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.pair_count(), 3);
        assert_eq!(catalog.prompts("The Cellar", "story").len(), 2);
        assert!(catalog.prompts("The Cellar", "flavor").is_empty());
        assert!(catalog.prompts("Nowhere", "story").is_empty());
    }

    #[test]
    fn test_pairs_are_sorted() {
        let mut catalog = PromptCatalog::new();
        catalog.add("b", "y", PromptTemplate::new("1"));
        catalog.add("a", "z", PromptTemplate::new("2"));
        catalog.add("a", "x", PromptTemplate::new("3"));

        let keys: Vec<String> = catalog.pairs().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a/x", "a/z", "b/y"]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(PromptCatalog::new().is_empty());
    }
}
