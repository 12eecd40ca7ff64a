//! HTTP API
//!
//! | Method | Path                     | Result                          |
//! |--------|--------------------------|---------------------------------|
//! | POST   | `/generation/`           | 204, 400, 404, 500              |
//! | GET    | `/generation/evaluating` | evaluating pool, `?title=&type=`|
//! | GET    | `/generation/finalized`  | finalized pool, `?title=&type=` |
//! | GET    | `/generation/{id}`       | one record or 404               |
//! | GET    | `/health`                | pool sizes                      |
//!
//! Every response carries permissive CORS headers; clients exceeding the
//! per-IP request budget get 429.

mod dto;
mod error;
mod handlers;
mod rate_limit;
mod routes;
mod state;

pub use dto::{GenerationView, ListQuery, RatingPayload};
pub use error::ApiError;
pub use rate_limit::FixedWindowLimiter;
pub use routes::{ApiOptions, create_router};
pub use state::AppState;
