//! Error translation at the boundary
//!
//! [`translate`] is the one place a pipeline [`Error`] becomes a
//! [`FailureResponse`]. Only validation failures expose detail, as ordered
//! field/message pairs. Every other failure carries a fixed title so no
//! internal state reaches the caller.
//!
//! # Example
//!
//! ```rust
//! use crud_pipeline::translate::{translate, FailureStatus};
//! use crud_pipeline::validation::ValidationFailure;
//! use crud_pipeline::Error;
//!
//! let err = Error::from(ValidationFailure::single("Name", "'Name' must not be empty."));
//! let response = translate(&err);
//! assert!(!response.success);
//! assert_eq!(response.status, FailureStatus::BadRequest);
//! assert_eq!(response.errors[0].field, "Name");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transport-neutral status classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStatus {
    /// The request was rejected by validation
    BadRequest,
    /// The requested entity does not exist
    NotFound,
    /// A fault the caller cannot correct
    Internal,
    /// A transient storage fault; retrying may succeed
    ServiceUnavailable,
}

impl fmt::Display for FailureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::Internal => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl FailureStatus {
    /// Machine-readable code, e.g. `BAD_REQUEST`
    #[must_use]
    pub fn error_code(&self) -> String {
        self.to_string().to_uppercase()
    }

    /// HTTP status for this classification
    #[cfg(feature = "http")]
    #[must_use]
    pub const fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// One field-level problem as exposed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    /// Field path, e.g. `Name`
    pub field: String,
    /// Human-readable message
    pub message: String,
}

/// Failure payload rendered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    /// Always `false`
    pub success: bool,
    /// Status classification
    pub status: FailureStatus,
    /// Machine-readable code
    pub code: String,
    /// Short summary
    pub title: String,
    /// Ordered field/message pairs; empty unless validation failed
    pub errors: Vec<FieldMessage>,
}

impl FailureResponse {
    fn new(status: FailureStatus, title: impl Into<String>, errors: Vec<FieldMessage>) -> Self {
        Self {
            success: false,
            status,
            code: status.error_code(),
            title: title.into(),
            errors,
        }
    }
}

/// Shape a pipeline error into the boundary payload
#[must_use]
pub fn translate(err: &Error) -> FailureResponse {
    match err {
        Error::Validation(failure) => {
            let errors = failure
                .violations()
                .iter()
                .map(|violation| FieldMessage {
                    field: violation.field.clone(),
                    message: violation.message.clone(),
                })
                .collect();
            FailureResponse::new(
                FailureStatus::BadRequest,
                "One or more validation errors occurred.",
                errors,
            )
        }
        Error::NotFound { entity_type, .. } => FailureResponse::new(
            FailureStatus::NotFound,
            format!("The requested {entity_type} was not found."),
            Vec::new(),
        ),
        Error::Repository(inner) if inner.is_retriable() => FailureResponse::new(
            FailureStatus::ServiceUnavailable,
            "Service temporarily unavailable.",
            Vec::new(),
        ),
        Error::Repository(_)
        | Error::NotConfigured(_)
        | Error::Mapping(_)
        | Error::Cancelled
        | Error::Config(_) => FailureResponse::new(
            FailureStatus::Internal,
            "An internal error occurred.",
            Vec::new(),
        ),
    }
}

impl From<&Error> for FailureResponse {
    fn from(err: &Error) -> Self {
        translate(err)
    }
}

#[cfg(feature = "http")]
mod http {
    use axum::{
        response::{IntoResponse, Response},
        Json,
    };

    use super::{translate, FailureResponse};
    use crate::error::Error;

    impl IntoResponse for FailureResponse {
        fn into_response(self) -> Response {
            (self.status.status_code(), Json(self)).into_response()
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> Response {
            let response = translate(&self);
            if self.is_expected() {
                tracing::info!(status = %response.status, error = %self, "Request rejected");
            } else {
                tracing::error!(status = %response.status, error = %self, "Request failed");
            }
            response.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{RepositoryError, RepositoryOperation};
    use crate::validation::{ValidationFailure, Violation};

    #[test]
    fn test_validation_exposes_ordered_pairs() {
        let failure = ValidationFailure::check(vec![
            Violation::new("Name", "'Name' must not be empty."),
            Violation::new("Number", "'Number' must be between 0 and 99. You entered 120."),
        ])
        .unwrap_err();

        let response = translate(&Error::from(failure));
        assert!(!response.success);
        assert_eq!(response.status, FailureStatus::BadRequest);
        assert_eq!(response.code, "BAD_REQUEST");
        let fields: Vec<_> = response.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["Name", "Number"]);
    }

    #[test]
    fn test_not_found_hides_identity() {
        let response = translate(&Error::not_found("Team", 9999));
        assert_eq!(response.status, FailureStatus::NotFound);
        assert_eq!(response.title, "The requested Team was not found.");
        assert!(response.errors.is_empty());
        assert!(!response.title.contains("9999"));
    }

    #[test]
    fn test_faults_are_generic() {
        let storage = Error::from(RepositoryError::storage_error(
            RepositoryOperation::Add,
            "disk /dev/sda1 full",
        ));
        let response = translate(&storage);
        assert_eq!(response.status, FailureStatus::Internal);
        assert_eq!(response.title, "An internal error occurred.");
        assert!(!serde_json::to_string(&response).unwrap().contains("sda1"));

        let wiring = translate(&Error::not_configured("CreatePlayer handler has no entity construction step"));
        assert_eq!(wiring.status, FailureStatus::Internal);
        assert!(wiring.errors.is_empty());
    }

    #[test]
    fn test_retriable_storage_is_unavailable() {
        let err = Error::from(RepositoryError::timeout(RepositoryOperation::Query, "slow"));
        assert_eq!(translate(&err).status, FailureStatus::ServiceUnavailable);
    }

    #[test]
    fn test_serialized_shape() {
        let err = Error::from(ValidationFailure::single("Name", "'Name' must not be empty."));
        let json = serde_json::to_value(translate(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["status"], "bad_request");
        assert_eq!(json["errors"][0]["field"], "Name");
        assert_eq!(json["errors"][0]["message"], "'Name' must not be empty.");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_status_codes() {
        assert_eq!(FailureStatus::BadRequest.status_code().as_u16(), 400);
        assert_eq!(FailureStatus::NotFound.status_code().as_u16(), 404);
        assert_eq!(FailureStatus::Internal.status_code().as_u16(), 500);
        assert_eq!(FailureStatus::ServiceUnavailable.status_code().as_u16(), 503);
    }
}
