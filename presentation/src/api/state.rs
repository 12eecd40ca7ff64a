use genpool_application::{ListGenerationsUseCase, SubmitRatingUseCase};
use std::sync::Arc;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub ratings: Arc<SubmitRatingUseCase>,
    pub listing: Arc<ListGenerationsUseCase>,
}

impl AppState {
    pub fn new(ratings: SubmitRatingUseCase, listing: ListGenerationsUseCase) -> Self {
        Self {
            ratings: Arc::new(ratings),
            listing: Arc::new(listing),
        }
    }
}
