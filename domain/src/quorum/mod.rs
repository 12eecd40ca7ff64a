//! Quorum consensus domain
//!
//! This module contains the rating-aggregation rules that decide whether an
//! evaluating generation is finalized or rejected.
//!
//! # Flow
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  rating arrives ──▶ ratings < threshold? ──yes──▶ Pending      │
//! │                          │ no                                 │
//! │                          ▼                                    │
//! │                 consensus(ratings)                            │
//! │                          │                                    │
//! │          0 ∈ leaders? ──yes──▶ Rejected (discard)             │
//! │                          │ no                                 │
//! │                          ▼                                    │
//! │                      Approved (finalize)                      │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod consensus;
pub mod rule;

// Re-export main types
pub use consensus::{ConsensusOutcome, Verdict, consensus, tally};
pub use rule::PromotionRule;
