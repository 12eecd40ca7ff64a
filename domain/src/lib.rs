//! Domain layer for genpool
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Generation pools
//!
//! Every machine-written text lives in exactly one of two pools:
//!
//! - **Evaluating**: collecting ratings until enough distinct raters voted
//! - **Finalized**: accepted by consensus, still open to further ratings
//!
//! ## Quorum
//!
//! Once a generation reaches the promotion threshold, the classification
//! values with the highest vote count form the consensus. A consensus that
//! contains the "disliked" value rejects the generation.
//!
//! ## Demand
//!
//! The prompt catalog lists which (subject, category) pairs should always
//! have a full pool of evaluating generations. The shortfall is the deficit.

pub mod core;
pub mod generation;
pub mod prompt;
pub mod quorum;

// Re-export commonly used types
pub use core::{error::DomainError, string::preview};
pub use generation::{
    deficit::{Deficit, compute_deficits},
    entities::{Generation, GenerationStatus},
    pools::{GenerationPools, StoreSnapshot},
    ratings::{RatingChange, Ratings},
    value_objects::{Classification, GenerationId, PairKey, RaterId},
};
pub use prompt::{PromptCatalog, PromptTemplate, strip_echoed_tags};
pub use quorum::{ConsensusOutcome, PromotionRule, Verdict, consensus};
