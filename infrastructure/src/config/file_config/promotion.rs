//! Promotion configuration from TOML (`[promotion]` section)

use genpool_domain::PromotionRule;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePromotionConfig {
    /// Distinct raters needed before a generation is decided
    pub threshold: usize,
}

impl Default for FilePromotionConfig {
    fn default() -> Self {
        Self {
            threshold: PromotionRule::DEFAULT_THRESHOLD,
        }
    }
}

impl FilePromotionConfig {
    pub fn to_rule(&self) -> PromotionRule {
        PromotionRule::new(self.threshold)
    }
}
