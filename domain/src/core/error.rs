//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Generation not found: {0}")]
    GenerationNotFound(String),

    #[error("Generation already exists: {0}")]
    DuplicateGeneration(String),
}

impl DomainError {
    /// Check if this error means the referenced generation does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::GenerationNotFound(_))
    }

    /// Name of the offending input field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            DomainError::MissingField(field) => Some(*field),
            DomainError::InvalidField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = DomainError::MissingField("client_id");
        assert_eq!(error.to_string(), "Missing required field: client_id");
        assert_eq!(error.field(), Some("client_id"));
    }

    #[test]
    fn test_is_not_found_check() {
        assert!(DomainError::GenerationNotFound("abc".to_string()).is_not_found());
        assert!(!DomainError::MissingField("uuid").is_not_found());
        assert!(
            !DomainError::InvalidField {
                field: "classification",
                reason: "not an integer".to_string()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_not_found_has_no_field() {
        assert_eq!(DomainError::GenerationNotFound("x".into()).field(), None);
    }
}
