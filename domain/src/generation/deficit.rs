//! Coverage deficits: how many more evaluating generations each pair needs.

use super::value_objects::PairKey;
use crate::prompt::PromptCatalog;
use std::collections::HashMap;

/// Shortfall for one (subject, category) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deficit {
    pub pair: PairKey,
    /// Evaluating generations currently in the pool
    pub current: usize,
    /// `target - current`, always at least 1
    pub missing: usize,
}

impl Deficit {
    /// How many generations to request this round, given a per-round cap
    pub fn request_amount(&self, cap: usize) -> usize {
        self.missing.min(cap.max(1))
    }
}

/// Compute deficits for every catalog pair that has at least one prompt.
///
/// Pairs at or above `target` are omitted. Output follows catalog order.
pub fn compute_deficits(
    catalog: &PromptCatalog,
    evaluating_counts: &HashMap<PairKey, usize>,
    target: usize,
) -> Vec<Deficit> {
    catalog
        .pairs()
        .filter(|(_, prompts)| !prompts.is_empty())
        .filter_map(|(pair, _)| {
            let current = evaluating_counts.get(&pair).copied().unwrap_or(0);
            (current < target).then(|| Deficit {
                missing: target - current,
                pair,
                current,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptTemplate;

    fn catalog() -> PromptCatalog {
        let mut catalog = PromptCatalog::new();
        catalog.add("Cellar", "story", PromptTemplate::new("Describe the {subject}"));
        catalog.add("Cellar", "flavor", PromptTemplate::new("A line about {subject}"));
        catalog.add_category("Attic", "story");
        catalog
    }

    #[test]
    fn test_empty_pools_need_full_target() {
        let deficits = compute_deficits(&catalog(), &HashMap::new(), 5);

        assert_eq!(deficits.len(), 2);
        assert!(deficits.iter().all(|d| d.current == 0 && d.missing == 5));
    }

    #[test]
    fn test_pairs_without_prompts_are_skipped() {
        let deficits = compute_deficits(&catalog(), &HashMap::new(), 5);
        assert!(deficits.iter().all(|d| d.pair.subject != "Attic"));
    }

    #[test]
    fn test_full_pairs_are_omitted() {
        let mut counts = HashMap::new();
        counts.insert(PairKey::new("Cellar", "story"), 5);
        counts.insert(PairKey::new("Cellar", "flavor"), 3);

        let deficits = compute_deficits(&catalog(), &counts, 5);
        assert_eq!(deficits.len(), 1);
        assert_eq!(deficits[0].pair, PairKey::new("Cellar", "flavor"));
        assert_eq!(deficits[0].current, 3);
        assert_eq!(deficits[0].missing, 2);
    }

    #[test]
    fn test_request_amount_is_capped() {
        let deficit = Deficit {
            pair: PairKey::new("a", "b"),
            current: 1,
            missing: 4,
        };
        assert_eq!(deficit.request_amount(1), 1);
        assert_eq!(deficit.request_amount(10), 4);
        assert_eq!(deficit.request_amount(0), 1);
    }
}
