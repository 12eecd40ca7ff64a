//! Prompt catalog read from a JSON or TOML file.
//!
//! Both formats use the same nesting, subject then category then prompts:
//!
//! ```toml
//! ["The Cellar"]
//! story = ["[Title: {subject}; Style: eerie] Write a short {category}."]
//! flavor = ["One line about {subject}."]
//! ```

use async_trait::async_trait;
use genpool_application::ports::catalog_source::{CatalogError, PromptCatalogSource};
use genpool_domain::PromptCatalog;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct FilePromptCatalogSource {
    path: PathBuf,
}

impl FilePromptCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn parse(&self, content: &str) -> Result<PromptCatalog, CatalogError> {
        let parsed = if self.is_json() {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            toml::from_str(content).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| CatalogError::Invalid(format!("{}: {}", self.path.display(), reason)))
    }
}

#[async_trait]
impl PromptCatalogSource for FilePromptCatalogSource {
    async fn load_catalog(&self) -> Result<PromptCatalog, CatalogError> {
        let content =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| CatalogError::Unreadable {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })?;

        let catalog = self.parse(&content)?;

        let empty: Vec<String> = catalog
            .pairs()
            .filter(|(_, prompts)| prompts.is_empty())
            .map(|(pair, _)| pair.to_string())
            .collect();
        if !empty.is_empty() {
            warn!("Pairs without prompts will not be stocked: {}", empty.join(", "));
        }

        info!(
            "Loaded prompt catalog {} ({} pairs)",
            self.path.display(),
            catalog.pair_count()
        );
        Ok(catalog)
    }
}
