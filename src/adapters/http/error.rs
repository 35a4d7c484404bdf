//! Error bodies and status mapping shared by every endpoint.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::reporting::ReportingError;
use crate::domain::submission::AssessmentError;

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed.to_string(), message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden.to_string(), message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError.to_string(), message)
    }

    /// Attaches key/value details; an empty map leaves `details` unset.
    pub fn with_details(mut self, details: HashMap<String, String>) -> Self {
        if !details.is_empty() {
            self.details = serde_json::to_value(details).ok();
        }
        self
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidStateTransition
        | ErrorCode::SubmissionCompleted => StatusCode::BAD_REQUEST,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::SubmissionNotFound | ErrorCode::RespondentNotFound => StatusCode::NOT_FOUND,
        ErrorCode::DatabaseError => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Builds an error response from its parts.
pub fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

pub fn handle_assessment_error(error: AssessmentError) -> Response {
    let code = error.code();
    if code == ErrorCode::DatabaseError || code == ErrorCode::InternalError {
        tracing::error!(error = %error, details = ?error.details(), "assessment request failed");
    }
    let body = ErrorResponse::new(code.to_string(), error.message()).with_details(error.details());
    error_response(status_for(code), body)
}

pub fn handle_reporting_error(error: ReportingError) -> Response {
    let code = error.code();
    if code == ErrorCode::DatabaseError || code == ErrorCode::InternalError {
        tracing::error!(error = %error, details = ?error.details(), "reporting request failed");
    }
    let body = ErrorResponse::new(code.to_string(), error.message()).with_details(error.details());
    error_response(status_for(code), body)
}
