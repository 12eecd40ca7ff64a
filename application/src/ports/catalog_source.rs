//! Prompt catalog source port

use async_trait::async_trait;
use genpool_domain::PromptCatalog;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read prompt catalog {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Invalid prompt catalog: {0}")]
    Invalid(String),
}

/// Where the demand scheduler's prompt catalog comes from.
///
/// Called once at startup; the catalog is read-only afterwards.
#[async_trait]
pub trait PromptCatalogSource: Send + Sync {
    async fn load_catalog(&self) -> Result<PromptCatalog, CatalogError>;
}
