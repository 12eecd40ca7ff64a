//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod demand_scheduler;
pub mod list_generations;
pub mod submit_rating;
