//! Configuration file loading for genpool
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `GENPOOL_*` environment variables
//! 3. Project root: `./genpool.toml` or `./.genpool.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/genpool/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileCatalogConfig, FileConfig, FileGeneratorConfig, FileLoggingConfig,
    FilePromotionConfig, FileSchedulerConfig, FileServerConfig, FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
