//! Snapshot storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// JSON document holding both pools
    pub path: PathBuf,
    /// Keep everything in memory; nothing survives a restart
    pub ephemeral: bool,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("generations.json"),
            ephemeral: false,
        }
    }
}
