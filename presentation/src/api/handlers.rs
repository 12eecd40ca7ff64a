use super::dto::{GenerationView, ListQuery, RatingPayload};
use super::error::ApiError;
use super::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use genpool_application::{GenerationFilter, GenerationPool};
use genpool_domain::GenerationId;
use serde_json::json;

/// POST /generation/: record one rating
pub(super) async fn submit_rating(
    State(state): State<AppState>,
    body: Result<Json<RatingPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    state.ratings.submit(payload.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /generation/evaluating
pub(super) async fn list_evaluating(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<GenerationView>> {
    list(&state, GenerationPool::Evaluating, query.into()).await
}

/// GET /generation/finalized
pub(super) async fn list_finalized(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<GenerationView>> {
    list(&state, GenerationPool::Finalized, query.into()).await
}

async fn list(
    state: &AppState,
    pool: GenerationPool,
    filter: GenerationFilter,
) -> Json<Vec<GenerationView>> {
    let generations = state.listing.list(pool, &filter).await;
    Json(generations.iter().map(GenerationView::from).collect())
}

/// GET /generation/{id}
pub(super) async fn get_generation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GenerationView>, ApiError> {
    let generation = state.listing.get(&GenerationId::new(id)).await?;
    Ok(Json(GenerationView::from(&generation)))
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.listing.stats().await;
    Json(json!({
        "status": "ok",
        "evaluating": stats.evaluating,
        "finalized": stats.finalized,
    }))
}
