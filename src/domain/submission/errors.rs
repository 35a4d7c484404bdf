//! Errors for respondent-facing assessment operations.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, DomainId, ErrorCode, ItemId};

/// Assessment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Submission was not found.
    NotFound(String),
    /// Caller does not own the submission.
    Forbidden,
    /// Operation not allowed in the current lifecycle state.
    InvalidState(String),
    /// Input rejected before any write.
    ValidationFailed {
        field: String,
        message: String,
        details: HashMap<String, String>,
    },
    /// Completion requested while catalog items are still unanswered.
    IncompleteDomain {
        domain_id: DomainId,
        missing: Vec<ItemId>,
    },
    /// The store could not be reached or the statement failed.
    StoreUnavailable {
        message: String,
        details: HashMap<String, String>,
    },
    /// Anything else.
    Internal(String),
}

impl AssessmentError {
    pub fn not_found(id: impl ToString) -> Self {
        AssessmentError::NotFound(id.to_string())
    }

    pub fn forbidden() -> Self {
        AssessmentError::Forbidden
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        AssessmentError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AssessmentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn incomplete_domain(domain_id: DomainId, missing: Vec<ItemId>) -> Self {
        AssessmentError::IncompleteDomain { domain_id, missing }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::NotFound(_) => ErrorCode::SubmissionNotFound,
            AssessmentError::Forbidden => ErrorCode::Forbidden,
            AssessmentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AssessmentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AssessmentError::IncompleteDomain { .. } => ErrorCode::ValidationFailed,
            AssessmentError::StoreUnavailable { .. } => ErrorCode::DatabaseError,
            AssessmentError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AssessmentError::NotFound(id) => format!("Submission not found: {}", id),
            AssessmentError::Forbidden => "Permission denied".to_string(),
            AssessmentError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AssessmentError::ValidationFailed { field, message, .. } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AssessmentError::IncompleteDomain { domain_id, missing } => format!(
                "Domain '{}' has {} unanswered item(s)",
                domain_id,
                missing.len()
            ),
            AssessmentError::StoreUnavailable { message, .. } => message.clone(),
            AssessmentError::Internal(msg) => format!("Error: {}", msg),
        }
    }

    /// Diagnostic context for the error body.
    pub fn details(&self) -> HashMap<String, String> {
        match self {
            AssessmentError::ValidationFailed { details, .. }
            | AssessmentError::StoreUnavailable { details, .. } => details.clone(),
            AssessmentError::IncompleteDomain { domain_id, missing } => HashMap::from([
                ("domain_id".to_string(), domain_id.to_string()),
                (
                    "missing_items".to_string(),
                    missing
                        .iter()
                        .map(ItemId::as_str)
                        .collect::<Vec<_>>()
                        .join(","),
                ),
            ]),
            _ => HashMap::new(),
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssessmentError {}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SubmissionNotFound => AssessmentError::NotFound(
                err.detail("submission_id").unwrap_or("unknown").to_string(),
            ),
            ErrorCode::Forbidden => AssessmentError::Forbidden,
            ErrorCode::InvalidStateTransition | ErrorCode::SubmissionCompleted => {
                AssessmentError::InvalidState(err.message)
            }
            ErrorCode::ValidationFailed => AssessmentError::ValidationFailed {
                field: err.detail("field").unwrap_or("unknown").to_string(),
                message: err.message,
                details: err.details,
            },
            ErrorCode::DatabaseError => AssessmentError::StoreUnavailable {
                message: err.message,
                details: err.details,
            },
            ErrorCode::RespondentNotFound | ErrorCode::InternalError => {
                AssessmentError::Internal(err.message)
            }
        }
    }
}
