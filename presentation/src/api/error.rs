//! Mapping of use-case errors to HTTP responses.
//!
//! Validation failures use the `{"message": {"<field>": "<help>"}}` shape
//! clients already parse; everything else carries a plain message string.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use genpool_application::{StoreError, SubmitRatingError};
use genpool_domain::DomainError;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// 400 naming the offending field
    Validation { field: &'static str, help: String },
    /// 400 for a body that is not JSON at all
    BadBody(String),
    /// 404
    NotFound(String),
    /// 500
    Internal(String),
}

/// Help text shown for a rejected submission field
pub(crate) fn field_help(field: &str) -> &'static str {
    match field {
        "uuid" => "UUID of the generation",
        "generation" => "Text of the generation",
        "title" => "Name of the thing the generation was written for",
        "type" => "Kind of generation, used to group it with similar ones",
        "classification" => "Integer classification, 0 means the player disliked it",
        "client_id" => "Unique ID of the rating client",
        _ => "Invalid value",
    }
}

impl ApiError {
    fn from_domain(e: DomainError) -> Self {
        match e {
            DomainError::MissingField(field) => ApiError::Validation {
                field,
                help: field_help(field).to_string(),
            },
            DomainError::InvalidField { field, reason } => ApiError::Validation {
                field,
                help: format!("{} ({})", field_help(field), reason),
            },
            DomainError::GenerationNotFound(id) => ApiError::NotFound(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<SubmitRatingError> for ApiError {
    fn from(e: SubmitRatingError) -> Self {
        match e {
            SubmitRatingError::Validation(e) => ApiError::from_domain(e),
            SubmitRatingError::NotFound(id) => ApiError::NotFound(id),
            SubmitRatingError::Persistence(e) => ApiError::Internal(e.to_string()),
            SubmitRatingError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Domain(e) => ApiError::from_domain(e),
            StoreError::Persistence(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation { field, help } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": { field: help } })),
            )
                .into_response(),
            ApiError::BadBody(reason) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": { "body": reason } })),
            )
                .into_response(),
            ApiError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": format!("Generation '{}' not found", id) })),
            )
                .into_response(),
            ApiError::Internal(reason) => {
                error!("Request failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_named_field() {
        let err = ApiError::from(SubmitRatingError::Validation(DomainError::MissingField(
            "client_id",
        )));
        match err {
            ApiError::Validation { field, help } => {
                assert_eq!(field, "client_id");
                assert_eq!(help, "Unique ID of the rating client");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadBody("eof".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ApiError::Internal("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
