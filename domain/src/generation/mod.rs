//! Generation domain
//!
//! Entities and value objects for machine-written texts awaiting or having
//! passed crowd consensus.
//!
//! - [`entities::Generation`]: one text and its ratings
//! - [`pools::GenerationPools`]: evaluating and finalized pools
//! - [`deficit`]: demand accounting against the prompt catalog

pub mod deficit;
pub mod entities;
pub mod pools;
pub mod ratings;
pub mod value_objects;
