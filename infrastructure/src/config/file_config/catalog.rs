//! Prompt catalog location from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// `.json` is read as JSON, anything else as TOML
    pub path: PathBuf,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("prompts.json"),
        }
    }
}
