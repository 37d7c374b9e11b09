//! Error responses for the HTTP adapter.
//!
//! Every handler error funnels into [`ApiError`], which picks the status code
//! from the error's [`ErrorCode`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::attendance::AttendanceError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::membership::MembershipError;
use crate::domain::payment::PaymentError;

/// Standard error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        status_for(self.code)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::MemberNotFound
        | ErrorCode::PaymentNotFound
        | ErrorCode::AttendanceNotFound
        | ErrorCode::MembershipTypeNotFound
        | ErrorCode::ClassNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition | ErrorCode::AlreadyCheckedIn => StatusCode::CONFLICT,
        ErrorCode::NoMembershipTypesConfigured => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::new(err.code, err.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<AttendanceError> for ApiError {
    fn from(err: AttendanceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
            "Internal server error".to_string()
        } else {
            self.message
        };

        let body = ErrorResponse::new(self.code.to_string(), message);
        (status, Json(body)).into_response()
    }
}
