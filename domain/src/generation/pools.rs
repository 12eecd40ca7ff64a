//! The two generation pools and the moves between them.
//!
//! [`GenerationPools`] is plain data with no locking or I/O; the application
//! layer wraps it with a lock and a persistence port.

use super::entities::{Generation, GenerationStatus};
use super::ratings::RatingChange;
use super::value_objects::{Classification, GenerationId, PairKey, RaterId};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Point-in-time copy of both pools, as handed to snapshot storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub evaluating: Vec<Generation>,
    pub finalized: Vec<Generation>,
}

impl StoreSnapshot {
    pub fn is_empty(&self) -> bool {
        self.evaluating.is_empty() && self.finalized.is_empty()
    }

    pub fn len(&self) -> usize {
        self.evaluating.len() + self.finalized.len()
    }
}

/// Evaluating and finalized generations keyed by id.
///
/// An id lives in at most one pool at a time.
#[derive(Debug, Clone, Default)]
pub struct GenerationPools {
    evaluating: BTreeMap<GenerationId, Generation>,
    finalized: BTreeMap<GenerationId, Generation>,
}

impl GenerationPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild pools from a snapshot.
    ///
    /// Statuses are re-derived from the pool a record came from. An id found
    /// in both pools keeps its finalized copy.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let finalized: BTreeMap<_, _> = snapshot
            .finalized
            .into_iter()
            .map(|g| (g.id().clone(), g.with_status(GenerationStatus::Finalized)))
            .collect();

        let evaluating = snapshot
            .evaluating
            .into_iter()
            .filter(|g| !finalized.contains_key(g.id()))
            .map(|g| (g.id().clone(), g.with_status(GenerationStatus::Evaluating)))
            .collect();

        Self {
            evaluating,
            finalized,
        }
    }

    /// Look up a generation, evaluating pool first
    pub fn get(&self, id: &GenerationId) -> Option<&Generation> {
        self.evaluating.get(id).or_else(|| self.finalized.get(id))
    }

    pub fn is_finalized(&self, id: &GenerationId) -> bool {
        self.finalized.contains_key(id)
    }

    pub fn is_evaluating(&self, id: &GenerationId) -> bool {
        self.evaluating.contains_key(id)
    }

    /// Get the evaluating record for `id`, creating it with `build` if absent.
    ///
    /// Returns the record and whether it was created. Fails if `id` is
    /// already finalized, or with whatever error `build` returns.
    pub fn upsert_evaluating<F>(
        &mut self,
        id: &GenerationId,
        build: F,
    ) -> Result<(&mut Generation, bool), DomainError>
    where
        F: FnOnce(&GenerationId) -> Result<Generation, DomainError>,
    {
        if self.finalized.contains_key(id) {
            return Err(DomainError::DuplicateGeneration(id.to_string()));
        }

        match self.evaluating.entry(id.clone()) {
            Entry::Occupied(entry) => Ok((entry.into_mut(), false)),
            Entry::Vacant(entry) => {
                let generation = build(id)?.with_status(GenerationStatus::Evaluating);
                Ok((entry.insert(generation), true))
            }
        }
    }

    /// Add a brand-new evaluating record
    pub fn insert_evaluating(&mut self, generation: Generation) -> Result<(), DomainError> {
        let id = generation.id().clone();
        if self.evaluating.contains_key(&id) || self.finalized.contains_key(&id) {
            return Err(DomainError::DuplicateGeneration(id.to_string()));
        }
        self.evaluating
            .insert(id, generation.with_status(GenerationStatus::Evaluating));
        Ok(())
    }

    /// Move an evaluating record into the finalized pool
    pub fn move_to_finalized(&mut self, id: &GenerationId) -> Result<&Generation, DomainError> {
        let mut generation = self
            .evaluating
            .remove(id)
            .ok_or_else(|| DomainError::GenerationNotFound(id.to_string()))?;
        generation.set_status(GenerationStatus::Finalized);

        Ok(self.finalized.entry(id.clone()).or_insert(generation))
    }

    /// Drop an evaluating record, handing it back marked as rejected
    pub fn discard(&mut self, id: &GenerationId) -> Result<Generation, DomainError> {
        let mut generation = self
            .evaluating
            .remove(id)
            .ok_or_else(|| DomainError::GenerationNotFound(id.to_string()))?;
        generation.set_status(GenerationStatus::Rejected);
        Ok(generation)
    }

    /// Add or overwrite a rating on a finalized record
    pub fn merge_rating_into_finalized(
        &mut self,
        id: &GenerationId,
        rater: RaterId,
        classification: Classification,
    ) -> Result<RatingChange, DomainError> {
        let generation = self
            .finalized
            .get_mut(id)
            .ok_or_else(|| DomainError::GenerationNotFound(id.to_string()))?;
        Ok(generation.rate(rater, classification))
    }

    pub fn evaluating(&self) -> impl Iterator<Item = &Generation> {
        self.evaluating.values()
    }

    pub fn snapshot_evaluating(&self) -> Vec<Generation> {
        self.evaluating.values().cloned().collect()
    }

    pub fn snapshot_finalized(&self) -> Vec<Generation> {
        self.finalized.values().cloned().collect()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            evaluating: self.snapshot_evaluating(),
            finalized: self.snapshot_finalized(),
        }
    }

    /// Evaluating record count per (subject, category)
    pub fn evaluating_counts(&self) -> HashMap<PairKey, usize> {
        let mut counts = HashMap::new();
        for generation in self.evaluating.values() {
            *counts.entry(generation.pair_key()).or_insert(0) += 1;
        }
        counts
    }

    pub fn evaluating_len(&self) -> usize {
        self.evaluating.len()
    }

    pub fn finalized_len(&self) -> usize {
        self.finalized.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(id: &str) -> Generation {
        Generation::new(GenerationId::new(id), "text", "The Cellar", "story")
    }

    #[test]
    fn test_upsert_creates_then_reuses() {
        let mut pools = GenerationPools::new();
        let id = GenerationId::new("g-1");

        let (_, created) = pools
            .upsert_evaluating(&id, |id| Ok(Generation::new(id.clone(), "first", "s", "c")))
            .unwrap();
        assert!(created);

        let (existing, created) = pools
            .upsert_evaluating(&id, |id| Ok(Generation::new(id.clone(), "second", "s", "c")))
            .unwrap();
        assert!(!created);
        assert_eq!(existing.text(), "first");
    }

    #[test]
    fn test_upsert_propagates_builder_error() {
        let mut pools = GenerationPools::new();
        let id = GenerationId::new("missing");

        let err = pools
            .upsert_evaluating(&id, |id| {
                Err(DomainError::GenerationNotFound(id.to_string()))
            })
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!pools.is_evaluating(&id));
    }

    #[test]
    fn test_upsert_refuses_finalized_id() {
        let mut pools = GenerationPools::new();
        pools.insert_evaluating(generation("g-1")).unwrap();
        pools.move_to_finalized(&GenerationId::new("g-1")).unwrap();

        let result = pools.upsert_evaluating(&GenerationId::new("g-1"), |id| {
            Ok(Generation::new(id.clone(), "t", "s", "c"))
        });
        assert!(matches!(result, Err(DomainError::DuplicateGeneration(_))));
    }

    #[test]
    fn test_move_to_finalized_leaves_single_copy() {
        let mut pools = GenerationPools::new();
        let id = GenerationId::new("g-1");
        pools.insert_evaluating(generation("g-1")).unwrap();

        let moved = pools.move_to_finalized(&id).unwrap();
        assert_eq!(moved.status(), GenerationStatus::Finalized);

        assert!(!pools.is_evaluating(&id));
        assert!(pools.is_finalized(&id));
        assert_eq!(pools.get(&id).unwrap().status(), GenerationStatus::Finalized);
    }

    #[test]
    fn test_discard_removes_from_both_pools() {
        let mut pools = GenerationPools::new();
        let id = GenerationId::new("g-1");
        pools.insert_evaluating(generation("g-1")).unwrap();

        let dropped = pools.discard(&id).unwrap();
        assert_eq!(dropped.status(), GenerationStatus::Rejected);
        assert!(pools.get(&id).is_none());
        assert!(pools.discard(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut pools = GenerationPools::new();
        pools.insert_evaluating(generation("g-1")).unwrap();
        assert!(pools.insert_evaluating(generation("g-1")).is_err());
    }

    #[test]
    fn test_merge_into_finalized_requires_finalized() {
        let mut pools = GenerationPools::new();
        let id = GenerationId::new("g-1");
        pools.insert_evaluating(generation("g-1")).unwrap();

        assert!(
            pools
                .merge_rating_into_finalized(&id, RaterId::new("a"), Classification::new(1))
                .is_err()
        );

        pools.move_to_finalized(&id).unwrap();
        let change = pools
            .merge_rating_into_finalized(&id, RaterId::new("a"), Classification::new(1))
            .unwrap();
        assert_eq!(change, RatingChange::Added);
    }

    #[test]
    fn test_from_snapshot_prefers_finalized_copy() {
        let snapshot = StoreSnapshot {
            evaluating: vec![generation("dup"), generation("only-eval")],
            finalized: vec![generation("dup")],
        };

        let pools = GenerationPools::from_snapshot(snapshot);
        assert_eq!(pools.evaluating_len(), 1);
        assert_eq!(pools.finalized_len(), 1);
        assert_eq!(
            pools.get(&GenerationId::new("dup")).unwrap().status(),
            GenerationStatus::Finalized
        );
    }

    #[test]
    fn test_evaluating_counts_by_pair() {
        let mut pools = GenerationPools::new();
        pools.insert_evaluating(generation("a")).unwrap();
        pools.insert_evaluating(generation("b")).unwrap();
        pools
            .insert_evaluating(Generation::new(GenerationId::new("c"), "t", "Attic", "story"))
            .unwrap();

        let counts = pools.evaluating_counts();
        assert_eq!(counts[&PairKey::new("The Cellar", "story")], 2);
        assert_eq!(counts[&PairKey::new("Attic", "story")], 1);
    }
}
