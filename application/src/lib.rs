//! Application layer for genpool
//!
//! This crate contains use cases, port definitions, the shared generation
//! store, and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod store;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::SchedulerParams;
pub use ports::{
    activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger},
    catalog_source::{CatalogError, PromptCatalogSource},
    snapshot_storage::{SnapshotStorage, StorageError},
    text_generator::{GeneratorError, TextGenerator},
};
pub use store::{GenerationStore, Mutation, StoreError, StoreStats};
pub use use_cases::demand_scheduler::{DemandSchedulerUseCase, IterationReport, SchedulerError};
pub use use_cases::list_generations::{GenerationFilter, GenerationPool, ListGenerationsUseCase};
pub use use_cases::submit_rating::{
    GenerationContent, RatingOutcome, RatingRequest, SubmitRatingError, SubmitRatingInput,
    SubmitRatingUseCase,
};
