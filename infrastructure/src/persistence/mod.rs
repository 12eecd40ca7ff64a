//! Snapshot storage adapters
//!
//! - [`JsonFileSnapshotStorage`]: one JSON document, replaced atomically
//! - [`InMemorySnapshotStorage`]: nothing survives the process

mod json_file;
mod memory;

pub use json_file::JsonFileSnapshotStorage;
pub use memory::InMemorySnapshotStorage;
