//! Promotion rule: when a generation has enough raters to be judged.

/// Number of distinct raters required before consensus is computed.
///
/// # Example
///
/// ```
/// use genpool_domain::quorum::PromotionRule;
///
/// let rule = PromotionRule::default();
/// assert_eq!(rule.threshold(), 5);
/// assert!(!rule.is_reached(4));
/// assert!(rule.is_reached(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromotionRule {
    threshold: usize,
}

impl PromotionRule {
    pub const DEFAULT_THRESHOLD: usize = 5;

    /// A threshold of zero is raised to one: a generation cannot be judged
    /// before anyone rated it.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Check if `raters` distinct raters are enough to decide
    pub fn is_reached(&self, raters: usize) -> bool {
        raters >= self.threshold
    }

    /// Raters still needed before a decision
    pub fn remaining(&self, raters: usize) -> usize {
        self.threshold.saturating_sub(raters)
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> String {
        format!("decide after {} distinct raters", self.threshold)
    }
}

impl Default for PromotionRule {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl std::fmt::Display for PromotionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
