//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assessment domain.

mod errors;
mod ids;
mod respondent;
mod score;
mod state_machine;
mod submission_status;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DomainId, ItemId, OrganizationName, RespondentId, SubIndexId, SubmissionId};
pub use respondent::{RespondentProfile, Role};
pub use score::{round2, NormalizedScore, RawScore, RAW_SCORE_MAX, RAW_SCORE_MIN};
pub use state_machine::StateMachine;
pub use submission_status::SubmissionStatus;
pub use timestamp::Timestamp;
