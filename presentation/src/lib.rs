//! Presentation layer for genpool
//!
//! This crate contains the CLI definition and the HTTP API that exposes
//! rating submission and the generation pools.

pub mod api;
pub mod cli;

// Re-export commonly used types
pub use api::{ApiOptions, AppState, create_router};
pub use cli::commands::Cli;
