//! Locked, persisted generation pools.
//!
//! # Locking discipline
//!
//! ```text
//! reads     ── RwLock read guard ──▶ clone what is needed ──▶ release
//! mutations ── RwLock write guard ─▶ mutate ─▶ persist ─────▶ release
//! ```
//!
//! Every mutate-then-persist sequence runs under one write guard, so two
//! persists never interleave and readers never see a record between pools.
//! Nothing slow other than the snapshot write may run under the guard.

use crate::ports::snapshot_storage::{SnapshotStorage, StorageError};
use genpool_domain::{
    Classification, DomainError, Generation, GenerationId, GenerationPools, PairKey, RaterId,
    RatingChange,
};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Errors surfaced by store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to persist generations: {0}")]
    Persistence(#[from] StorageError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Domain(e) if e.is_not_found())
    }
}

/// Result of a closure run by [`GenerationStore::mutate`].
///
/// `changed` tells the store whether the pools now differ from the last
/// persisted snapshot.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub changed: bool,
}

impl<T> Mutation<T> {
    pub fn changed(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }

    pub fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }
}

/// Pool sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub evaluating: usize,
    pub finalized: usize,
}

struct StoreState {
    pools: GenerationPools,
    /// Pools hold changes the last persist did not capture
    dirty: bool,
}

/// Generation pools shared by the rating path and the demand scheduler.
pub struct GenerationStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn SnapshotStorage>,
}

impl GenerationStore {
    /// Create a store seeded from the last persisted snapshot
    pub async fn open(storage: Arc<dyn SnapshotStorage>) -> Result<Self, StoreError> {
        let snapshot = storage.load().await?;
        let pools = GenerationPools::from_snapshot(snapshot);
        info!(
            "Loaded {} evaluating and {} finalized generations",
            pools.evaluating_len(),
            pools.finalized_len()
        );
        Ok(Self::with_pools(pools, storage))
    }

    /// Create a store around existing pools without touching storage
    pub fn with_pools(pools: GenerationPools, storage: Arc<dyn SnapshotStorage>) -> Self {
        Self {
            state: RwLock::new(StoreState {
                pools,
                dirty: false,
            }),
            storage,
        }
    }

    /// Look up a generation in either pool
    pub async fn get(&self, id: &GenerationId) -> Result<Generation, StoreError> {
        let state = self.state.read().await;
        state
            .pools
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::GenerationNotFound(id.to_string()).into())
    }

    pub async fn snapshot_evaluating(&self) -> Vec<Generation> {
        self.state.read().await.pools.snapshot_evaluating()
    }

    pub async fn snapshot_finalized(&self) -> Vec<Generation> {
        self.state.read().await.pools.snapshot_finalized()
    }

    /// Evaluating record count per (subject, category)
    pub async fn evaluating_counts(&self) -> HashMap<PairKey, usize> {
        self.state.read().await.pools.evaluating_counts()
    }

    pub async fn stats(&self) -> StoreStats {
        let state = self.state.read().await;
        StoreStats {
            evaluating: state.pools.evaluating_len(),
            finalized: state.pools.finalized_len(),
        }
    }

    /// Whether the in-memory pools are ahead of the persisted snapshot
    pub async fn is_dirty(&self) -> bool {
        self.state.read().await.dirty
    }

    /// Run `f` against the pools under the write guard, then persist.
    ///
    /// The snapshot is written whenever the pools are dirty, which includes
    /// changes left over from an earlier failed persist. A domain error from
    /// `f` is returned as-is; `f` must not have changed the pools in that case.
    pub async fn mutate<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut GenerationPools) -> Result<Mutation<T>, DomainError>,
    {
        let mut state = self.state.write().await;
        let mutation = f(&mut state.pools)?;

        if mutation.changed {
            state.dirty = true;
        }
        if state.dirty {
            self.flush(&mut state).await?;
        }

        Ok(mutation.value)
    }

    /// Write the current pools if anything is pending
    pub async fn persist(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if state.dirty {
            self.flush(&mut state).await?;
        }
        Ok(())
    }

    /// Add freshly generated records to the evaluating pool
    pub async fn insert_evaluating(&self, generations: Vec<Generation>) -> Result<usize, StoreError> {
        self.mutate(|pools| {
            let mut inserted = 0;
            for generation in generations {
                match pools.insert_evaluating(generation) {
                    Ok(()) => inserted += 1,
                    Err(e) => warn!("Skipping generation: {}", e),
                }
            }
            Ok(Mutation {
                changed: inserted > 0,
                value: inserted,
            })
        })
        .await
    }

    /// Move an evaluating record into the finalized pool
    pub async fn move_to_finalized(&self, id: &GenerationId) -> Result<Generation, StoreError> {
        self.mutate(|pools| pools.move_to_finalized(id).cloned().map(Mutation::changed))
            .await
    }

    /// Drop an evaluating record for good
    pub async fn discard(&self, id: &GenerationId) -> Result<Generation, StoreError> {
        self.mutate(|pools| pools.discard(id).map(Mutation::changed))
            .await
    }

    /// Add or overwrite a rating on a finalized record
    pub async fn merge_rating_into_finalized(
        &self,
        id: &GenerationId,
        rater: RaterId,
        classification: Classification,
    ) -> Result<RatingChange, StoreError> {
        self.mutate(|pools| {
            let change = pools.merge_rating_into_finalized(id, rater, classification)?;
            Ok(Mutation {
                changed: !change.is_unchanged(),
                value: change,
            })
        })
        .await
    }

    async fn flush(&self, state: &mut StoreState) -> Result<(), StorageError> {
        let snapshot = state.pools.snapshot();
        match self.storage.persist(&snapshot).await {
            Ok(()) => {
                state.dirty = false;
                debug!("Persisted {} generations", snapshot.len());
                Ok(())
            }
            Err(e) => {
                warn!("Persisting generations failed, will retry on next write: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingStorage;
    use genpool_domain::{GenerationStatus, StoreSnapshot};
    use std::sync::atomic::Ordering;

    fn generation(id: &str) -> Generation {
        Generation::new(GenerationId::new(id), "text", "Cellar", "story")
    }

    #[tokio::test]
    async fn test_open_loads_snapshot() {
        let storage = Arc::new(RecordingStorage {
            initial: StoreSnapshot {
                evaluating: vec![generation("a")],
                finalized: vec![generation("b")],
            },
            ..Default::default()
        });

        let store = GenerationStore::open(storage).await.unwrap();
        assert_eq!(
            store.stats().await,
            StoreStats {
                evaluating: 1,
                finalized: 1
            }
        );
        assert_eq!(
            store.get(&GenerationId::new("b")).await.unwrap().status(),
            GenerationStatus::Finalized
        );
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store =
            GenerationStore::with_pools(GenerationPools::new(), Arc::new(RecordingStorage::default()));
        let err = store.get(&GenerationId::new("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_changed_mutation_persists() {
        let storage = Arc::new(RecordingStorage::default());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());

        let inserted = store
            .insert_evaluating(vec![generation("a"), generation("b")])
            .await
            .unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(storage.persist_count(), 1);
        assert_eq!(storage.last().unwrap().evaluating.len(), 2);
        assert!(!store.is_dirty().await);
    }

    #[tokio::test]
    async fn test_unchanged_mutation_skips_persist() {
        let storage = Arc::new(RecordingStorage::default());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());

        store.mutate(|_| Ok(Mutation::unchanged(()))).await.unwrap();
        assert_eq!(storage.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_persist_is_surfaced_and_retried() {
        let storage = Arc::new(RecordingStorage::failing());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());

        let err = store
            .insert_evaluating(vec![generation("a")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert!(store.is_dirty().await);

        // Storage recovers; a no-op mutation still flushes the pending change
        storage.fail.store(false, Ordering::SeqCst);
        store.mutate(|_| Ok(Mutation::unchanged(()))).await.unwrap();

        assert_eq!(storage.persist_count(), 1);
        assert_eq!(storage.last().unwrap().evaluating.len(), 1);
        assert!(!store.is_dirty().await);
    }

    #[tokio::test]
    async fn test_move_and_discard() {
        let storage = Arc::new(RecordingStorage::default());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());
        store
            .insert_evaluating(vec![generation("keep"), generation("drop")])
            .await
            .unwrap();

        store.move_to_finalized(&GenerationId::new("keep")).await.unwrap();
        let dropped = store.discard(&GenerationId::new("drop")).await.unwrap();

        assert_eq!(dropped.status(), GenerationStatus::Rejected);
        assert!(store.snapshot_evaluating().await.is_empty());
        assert_eq!(store.snapshot_finalized().await.len(), 1);
        assert_eq!(storage.persist_count(), 3);
    }

    #[tokio::test]
    async fn test_merge_rating_same_value_does_not_persist() {
        let storage = Arc::new(RecordingStorage::default());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());
        store.insert_evaluating(vec![generation("a")]).await.unwrap();
        store.move_to_finalized(&GenerationId::new("a")).await.unwrap();

        let id = GenerationId::new("a");
        let first = store
            .merge_rating_into_finalized(&id, RaterId::new("r"), Classification::new(3))
            .await
            .unwrap();
        let second = store
            .merge_rating_into_finalized(&id, RaterId::new("r"), Classification::new(3))
            .await
            .unwrap();

        assert_eq!(first, RatingChange::Added);
        assert_eq!(second, RatingChange::Unchanged);
        assert_eq!(storage.persist_count(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_skipped() {
        let storage = Arc::new(RecordingStorage::default());
        let store = GenerationStore::with_pools(GenerationPools::new(), storage.clone());
        store.insert_evaluating(vec![generation("a")]).await.unwrap();

        let inserted = store.insert_evaluating(vec![generation("a")]).await.unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(storage.persist_count(), 1);
    }
}
