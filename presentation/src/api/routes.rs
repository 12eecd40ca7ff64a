use super::handlers;
use super::rate_limit::{FixedWindowLimiter, limit_by_ip};
use super::state::AppState;
use axum::Router;
use axum::http::{HeaderName, Method, header};
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Router-level settings
#[derive(Debug, Clone, Copy)]
pub struct ApiOptions {
    /// Requests per client IP per minute; 0 disables limiting
    pub rate_limit_per_minute: u32,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: 90,
        }
    }
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ])
}

pub fn create_router(state: AppState, options: ApiOptions) -> Router {
    let mut router = Router::new()
        .route("/generation/", post(handlers::submit_rating))
        .route("/generation/evaluating", get(handlers::list_evaluating))
        .route("/generation/finalized", get(handlers::list_finalized))
        .route("/generation/{id}", get(handlers::get_generation))
        .route("/health", get(handlers::health))
        .with_state(state);

    if options.rate_limit_per_minute > 0 {
        let limiter = Arc::new(FixedWindowLimiter::per_minute(options.rate_limit_per_minute));
        router = router.layer(middleware::from_fn_with_state(limiter, limit_by_ip));
    }

    // Outermost, so refusals and errors carry CORS headers too
    router.layer(cors())
}
