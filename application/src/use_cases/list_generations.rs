//! List Generations use case
//!
//! Read-only views over the two pools for the HTTP surface.

use crate::store::{GenerationStore, StoreError, StoreStats};
use genpool_domain::{Generation, GenerationId};
use std::sync::Arc;

/// Which pool to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPool {
    Evaluating,
    Finalized,
}

impl GenerationPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationPool::Evaluating => "evaluating",
            GenerationPool::Finalized => "finalized",
        }
    }
}

impl std::str::FromStr for GenerationPool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evaluating" => Ok(GenerationPool::Evaluating),
            "finalized" => Ok(GenerationPool::Finalized),
            other => Err(format!("unknown pool '{}'", other)),
        }
    }
}

/// Optional narrowing by subject and category; `None` matches everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationFilter {
    pub subject: Option<String>,
    pub category: Option<String>,
}

impl GenerationFilter {
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, generation: &Generation) -> bool {
        self.subject
            .as_deref()
            .is_none_or(|s| generation.subject() == s)
            && self
                .category
                .as_deref()
                .is_none_or(|c| generation.category() == c)
    }
}

pub struct ListGenerationsUseCase {
    store: Arc<GenerationStore>,
}

impl ListGenerationsUseCase {
    pub fn new(store: Arc<GenerationStore>) -> Self {
        Self { store }
    }

    /// Copy of one pool, narrowed by `filter`, ordered by id
    pub async fn list(&self, pool: GenerationPool, filter: &GenerationFilter) -> Vec<Generation> {
        let all = match pool {
            GenerationPool::Evaluating => self.store.snapshot_evaluating().await,
            GenerationPool::Finalized => self.store.snapshot_finalized().await,
        };
        all.into_iter().filter(|g| filter.matches(g)).collect()
    }

    pub async fn get(&self, id: &GenerationId) -> Result<Generation, StoreError> {
        self.store.get(id).await
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingStorage;
    use genpool_domain::{GenerationPools, GenerationStatus};

    async fn seeded() -> ListGenerationsUseCase {
        let store = Arc::new(GenerationStore::with_pools(
            GenerationPools::new(),
            Arc::new(RecordingStorage::default()),
        ));
        store
            .insert_evaluating(vec![
                Generation::new(GenerationId::new("a"), "one", "Cellar", "story"),
                Generation::new(GenerationId::new("b"), "two", "Cellar", "flavor"),
                Generation::new(GenerationId::new("c"), "three", "Attic", "story"),
            ])
            .await
            .unwrap();
        store.move_to_finalized(&GenerationId::new("c")).await.unwrap();
        ListGenerationsUseCase::new(store)
    }

    #[tokio::test]
    async fn test_list_each_pool() {
        let use_case = seeded().await;
        let none = GenerationFilter::default();

        let evaluating = use_case.list(GenerationPool::Evaluating, &none).await;
        let finalized = use_case.list(GenerationPool::Finalized, &none).await;

        assert_eq!(evaluating.len(), 2);
        assert_eq!(finalized.len(), 1);
        assert_eq!(finalized[0].status(), GenerationStatus::Finalized);
    }

    #[tokio::test]
    async fn test_filter_by_subject_and_category() {
        let use_case = seeded().await;

        let cellar = use_case
            .list(
                GenerationPool::Evaluating,
                &GenerationFilter::default().subject("Cellar"),
            )
            .await;
        assert_eq!(cellar.len(), 2);

        let stories = use_case
            .list(
                GenerationPool::Evaluating,
                &GenerationFilter::default().subject("Cellar").category("story"),
            )
            .await;
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].id().as_str(), "a");
    }

    #[tokio::test]
    async fn test_get_and_stats() {
        let use_case = seeded().await;

        assert_eq!(use_case.get(&GenerationId::new("c")).await.unwrap().text(), "three");
        assert!(use_case.get(&GenerationId::new("zzz")).await.unwrap_err().is_not_found());

        let stats = use_case.stats().await;
        assert_eq!((stats.evaluating, stats.finalized), (2, 1));
    }

    #[test]
    fn test_pool_from_str() {
        assert_eq!("finalized".parse::<GenerationPool>(), Ok(GenerationPool::Finalized));
        assert!("pending".parse::<GenerationPool>().is_err());
    }
}
