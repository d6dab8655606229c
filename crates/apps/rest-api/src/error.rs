//! Translation of service failures into HTTP responses.

use std::error::Error as StdError;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, ErrorCode, ErrorContract, ValidationFailure, Violation, classify};
use serde::Serialize;
use team_feature::TeamFeatureError;
use tracing::{debug, error};
use user_feature::UserFeatureError;

const UNKNOWN_MESSAGE: &str = "An unexpected error occurred";

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<Violation>,
}

impl ApiError {
    /// Render any error, falling back to `UNKNOWN_ERROR` for unrecognized ones
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        match classify(err) {
            Some(known) => {
                debug!(code = %known.code(), error = %err, "Request rejected");
                Self::from_contract(known)
            }
            None => {
                error!(error = %err, source = ?err.source(), "Unexpected failure");
                Self::unknown()
            }
        }
    }

    fn from_contract(known: &dyn ErrorContract) -> Self {
        Self {
            status: StatusCode::from_u16(known.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            code: known.code(),
            message: known.message(),
            violations: known.violations().to_vec(),
        }
    }

    fn unknown() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: ErrorCode::UnknownError,
            message: UNKNOWN_MESSAGE.to_string(),
            violations: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<UserFeatureError> for ApiError {
    fn from(err: UserFeatureError) -> Self {
        Self::from_error(&err)
    }
}

impl From<TeamFeatureError> for ApiError {
    fn from(err: TeamFeatureError) -> Self {
        Self::from_error(&err)
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(err: ValidationFailure) -> Self {
        Self::from_error(&err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_error(&err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
