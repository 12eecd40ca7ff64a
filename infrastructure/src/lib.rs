//! Infrastructure layer for genpool
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod generator;
pub mod logging;
pub mod persistence;

// Re-export commonly used types
pub use catalog::FilePromptCatalogSource;
pub use config::{ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use generator::HttpTextGenerator;
pub use logging::JsonlActivityLogger;
pub use persistence::{InMemorySnapshotStorage, JsonFileSnapshotStorage};
