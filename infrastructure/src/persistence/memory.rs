//! In-memory snapshot storage for ephemeral runs and tests.

use async_trait::async_trait;
use genpool_application::ports::snapshot_storage::{SnapshotStorage, StorageError};
use genpool_domain::StoreSnapshot;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemorySnapshotStorage {
    snapshot: Mutex<StoreSnapshot>,
}

impl InMemorySnapshotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

#[async_trait]
impl SnapshotStorage for InMemorySnapshotStorage {
    async fn load(&self) -> Result<StoreSnapshot, StorageError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StorageError> {
        *self.snapshot.lock().await = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genpool_domain::{Generation, GenerationId};

    #[tokio::test]
    async fn test_persist_then_load() {
        let storage = InMemorySnapshotStorage::new();
        assert!(storage.load().await.unwrap().is_empty());

        let snapshot = StoreSnapshot {
            evaluating: vec![Generation::new(GenerationId::new("a"), "t", "s", "c")],
            finalized: vec![],
        };
        storage.persist(&snapshot).await.unwrap();

        assert_eq!(storage.load().await.unwrap(), snapshot);
    }
}
