//! Prompt catalog adapters

mod file_catalog;

pub use file_catalog::FilePromptCatalogSource;
