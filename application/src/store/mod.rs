//! Shared generation store
//!
//! [`GenerationStore`] is the single owner of the evaluating and finalized
//! pools. Rating submissions and the demand scheduler both go through it.

mod generation_store;

pub use generation_store::{GenerationStore, Mutation, StoreError, StoreStats};
