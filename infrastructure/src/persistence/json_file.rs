//! JSON file snapshot storage.
//!
//! Both pools live in one document so that replacing it is a single rename:
//!
//! ```json
//! {
//!   "evaluating": {
//!     "<id>": { "generation": "...", "title": "...", "type": "...",
//!               "submitter_id": "...", "ratings": { "<client_id>": 1 } }
//!   },
//!   "finalized": { }
//! }
//! ```
//!
//! Writes go to `<path>.tmp`, are synced, then renamed over `<path>`.

use async_trait::async_trait;
use genpool_application::ports::snapshot_storage::{SnapshotStorage, StorageError};
use genpool_domain::{Generation, GenerationId, GenerationStatus, RaterId, Ratings, StoreSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
struct StoredGeneration {
    generation: String,
    title: String,
    #[serde(rename = "type")]
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submitter_id: Option<RaterId>,
    #[serde(default)]
    ratings: Ratings,
}

impl StoredGeneration {
    fn from_generation(generation: &Generation) -> Self {
        Self {
            generation: generation.text().to_string(),
            title: generation.subject().to_string(),
            category: generation.category().to_string(),
            submitter_id: generation.submitter_id().cloned(),
            ratings: generation.ratings().clone(),
        }
    }

    fn into_generation(self, id: String, status: GenerationStatus) -> Generation {
        let generation = Generation::new(
            GenerationId::new(id),
            self.generation,
            self.title,
            self.category,
        )
        .with_ratings(self.ratings)
        .with_status(status);

        match self.submitter_id {
            Some(submitter) => generation.with_submitter(submitter),
            None => generation,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPools {
    #[serde(default)]
    evaluating: BTreeMap<String, StoredGeneration>,
    #[serde(default)]
    finalized: BTreeMap<String, StoredGeneration>,
}

impl StoredPools {
    fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        let collect = |generations: &[Generation]| -> BTreeMap<String, StoredGeneration> {
            generations
                .iter()
                .map(|g| (g.id().to_string(), StoredGeneration::from_generation(g)))
                .collect()
        };
        Self {
            evaluating: collect(&snapshot.evaluating),
            finalized: collect(&snapshot.finalized),
        }
    }

    fn into_snapshot(self) -> StoreSnapshot {
        let convert = |pool: BTreeMap<String, StoredGeneration>, status| -> Vec<Generation> {
            pool.into_iter()
                .map(|(id, stored)| stored.into_generation(id, status))
                .collect()
        };
        StoreSnapshot {
            evaluating: convert(self.evaluating, GenerationStatus::Evaluating),
            finalized: convert(self.finalized, GenerationStatus::Finalized),
        }
    }
}

/// Snapshot storage backed by a single JSON file
pub struct JsonFileSnapshotStorage {
    path: PathBuf,
}

impl JsonFileSnapshotStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl SnapshotStorage for JsonFileSnapshotStorage {
    async fn load(&self) -> Result<StoreSnapshot, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "No snapshot at {}, starting with empty pools",
                    self.path.display()
                );
                return Ok(StoreSnapshot::default());
            }
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(StoreSnapshot::default());
        }

        let stored: StoredPools = serde_json::from_str(&content)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))?;
        Ok(stored.into_snapshot())
    }

    async fn persist(&self, snapshot: &StoreSnapshot) -> Result<(), StorageError> {
        let json = serde_json::to_vec_pretty(&StoredPools::from_snapshot(snapshot))
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::io_error(parent, e))?;
        }

        let temp = self.temp_path();
        let mut file = tokio::fs::File::create(&temp)
            .await
            .map_err(|e| Self::io_error(&temp, e))?;
        file.write_all(&json)
            .await
            .map_err(|e| Self::io_error(&temp, e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::io_error(&temp, e))?;
        drop(file);

        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| Self::io_error(&self.path, e))?;

        debug!("Wrote {} bytes to {}", json.len(), self.path.display());
        Ok(())
    }
}
