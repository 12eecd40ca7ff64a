//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod activity_logger;
pub mod catalog_source;
pub mod snapshot_storage;
pub mod text_generator;
