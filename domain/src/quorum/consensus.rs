//! Quorum Consensus over collected ratings
//!
//! The consensus of a rating set is every classification tied for the
//! highest vote count. A consensus containing [`Classification::DISLIKED`]
//! rejects the generation, no matter what else ties with it.

use super::rule::PromotionRule;
use crate::generation::ratings::Ratings;
use crate::generation::value_objects::Classification;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of judging one generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsensusOutcome {
    /// Consensus reached: move to the finalized pool
    Approved,
    /// Consensus reached: "disliked" is among the leaders, discard
    Rejected,
    /// Not enough distinct raters yet
    Pending,
}

/// Vote count per classification value
pub fn tally(ratings: &Ratings) -> BTreeMap<Classification, usize> {
    let mut counts = BTreeMap::new();
    for classification in ratings.values() {
        *counts.entry(classification).or_insert(0) += 1;
    }
    counts
}

/// Classification values tied for the highest vote count.
///
/// Empty when there are no ratings.
///
/// # Example
///
/// ```
/// use genpool_domain::{Classification, RaterId, Ratings, consensus};
///
/// let ratings: Ratings = [("a", 1), ("b", 1), ("c", 0), ("d", 0), ("e", 2)]
///     .into_iter()
///     .map(|(r, c)| (RaterId::new(r), Classification::new(c)))
///     .collect();
///
/// let leaders = consensus(&ratings);
/// assert_eq!(leaders.len(), 2);
/// assert!(leaders.contains(&Classification::DISLIKED));
/// ```
pub fn consensus(ratings: &Ratings) -> BTreeSet<Classification> {
    leaders_of(&tally(ratings))
}

fn leaders_of(counts: &BTreeMap<Classification, usize>) -> BTreeSet<Classification> {
    let Some(max) = counts.values().copied().max() else {
        return BTreeSet::new();
    };
    counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(classification, _)| *classification)
        .collect()
}

/// The judgement of one generation's ratings under a [`PromotionRule`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// What should happen to the generation
    pub outcome: ConsensusOutcome,
    /// Classifications tied for the most votes
    pub leaders: BTreeSet<Classification>,
    /// Votes per classification
    pub tally: BTreeMap<Classification, usize>,
    /// Distinct raters counted
    pub raters: usize,
}

impl Verdict {
    /// Judge `ratings`; pending until the rule's threshold is reached
    pub fn evaluate(ratings: &Ratings, rule: &PromotionRule) -> Self {
        let tally = tally(ratings);
        let leaders = leaders_of(&tally);
        let raters = ratings.len();

        let outcome = if !rule.is_reached(raters) {
            ConsensusOutcome::Pending
        } else if leaders.contains(&Classification::DISLIKED) {
            ConsensusOutcome::Rejected
        } else {
            ConsensusOutcome::Approved
        };

        Self {
            outcome,
            leaders,
            tally,
            raters,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.outcome == ConsensusOutcome::Rejected
    }

    /// Compact tally such as `"0:2 1:2 2:1"`
    pub fn vote_summary(&self) -> String {
        self.tally
            .iter()
            .map(|(classification, count)| format!("{}:{}", classification, count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
