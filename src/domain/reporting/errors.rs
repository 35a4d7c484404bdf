//! Reporting-specific error types.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode, RespondentId};
use crate::domain::submission::AssessmentError;

/// Errors for administrator-facing reporting operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportingError {
    /// The identity lookup knows no such respondent.
    RespondentNotFound(RespondentId),
    /// The caller is not an administrator.
    NotAdministrator(RespondentId),
    /// The store could not be reached or the statement failed.
    StoreUnavailable {
        message: String,
        details: HashMap<String, String>,
    },
    /// Anything else.
    Internal(String),
}

impl ReportingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReportingError::RespondentNotFound(_) => ErrorCode::RespondentNotFound,
            ReportingError::NotAdministrator(_) => ErrorCode::Forbidden,
            ReportingError::StoreUnavailable { .. } => ErrorCode::DatabaseError,
            ReportingError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ReportingError::RespondentNotFound(id) => format!("Respondent not found: {}", id),
            ReportingError::NotAdministrator(id) => {
                format!("{} is not an administrator", id)
            }
            ReportingError::StoreUnavailable { message, .. } => message.clone(),
            ReportingError::Internal(msg) => format!("Error: {}", msg),
        }
    }

    pub fn details(&self) -> HashMap<String, String> {
        match self {
            ReportingError::StoreUnavailable { details, .. } => details.clone(),
            ReportingError::RespondentNotFound(id) | ReportingError::NotAdministrator(id) => {
                HashMap::from([("respondent_id".to_string(), id.to_string())])
            }
            ReportingError::Internal(_) => HashMap::new(),
        }
    }
}

impl std::fmt::Display for ReportingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ReportingError {}

impl From<DomainError> for ReportingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DatabaseError => ReportingError::StoreUnavailable {
                message: err.message,
                details: err.details,
            },
            _ => ReportingError::Internal(err.message),
        }
    }
}

/// Per-member status reads reuse the respondent-facing handlers.
impl From<AssessmentError> for ReportingError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::StoreUnavailable { message, details } => {
                ReportingError::StoreUnavailable { message, details }
            }
            other => ReportingError::Internal(other.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_failure_keeps_operation_detail() {
        let err: ReportingError = DomainError::database("find_team", "pool timed out").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(
            err.details().get("operation").map(String::as_str),
            Some("find_team")
        );
    }

    #[test]
    fn assessment_store_failure_stays_a_store_failure() {
        let err: ReportingError =
            AssessmentError::from(DomainError::database("find_latest", "connection reset")).into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(
            err.details().get("operation").map(String::as_str),
            Some("find_latest")
        );
    }

    #[test]
    fn not_administrator_is_forbidden() {
        let err = ReportingError::NotAdministrator(RespondentId::new("bob@example.com").unwrap());
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "bob@example.com is not an administrator");
    }
}
