//! Snapshot storage port
//!
//! Durable home of the two generation pools.

use async_trait::async_trait;
use genpool_domain::StoreSnapshot;
use thiserror::Error;

/// Errors that can occur while loading or persisting a snapshot
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Durable storage for generation pools.
///
/// `persist` must not return `Ok` before the snapshot is on stable storage,
/// and a crash during `persist` must leave the previous snapshot readable.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Read the last persisted snapshot (empty if nothing was ever written)
    async fn load(&self) -> Result<StoreSnapshot, StorageError>;

    /// Replace the stored snapshot
    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StorageError>;
}
