//! Submission repository port.
//!
//! Owns creation, lookup, and the completion transition of submissions.
//! Rows are never deleted.

use crate::domain::foundation::{DomainError, RespondentId, SubmissionId, Timestamp};
use crate::domain::submission::Submission;
use async_trait::async_trait;

/// Repository port for Submission persistence.
///
/// "Most recent" always means the maximum by start time, ties broken by id.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Returns the respondent's most recent in-progress submission, creating
    /// one started at `now` when none exists.
    ///
    /// The boolean is `true` when a row was inserted. Implementations must
    /// serialize the check and the insert per respondent; a failed check is
    /// an error, never "not found".
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn get_or_create_in_progress(
        &self,
        respondent_id: &RespondentId,
        now: Timestamp,
    ) -> Result<(Submission, bool), DomainError>;

    /// Find a submission by its ID.
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError>;

    /// The respondent's most recent submission of any status.
    async fn find_latest(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<Submission>, DomainError>;

    /// The most recent submission of each listed respondent.
    ///
    /// Respondents without submissions are absent from the result.
    async fn find_latest_for_respondents(
        &self,
        respondent_ids: &[RespondentId],
    ) -> Result<Vec<Submission>, DomainError>;

    /// Sets status to completed with `at` as completion time.
    ///
    /// Returns `false` when the submission was already completed; the
    /// stored completion time is left untouched in that case.
    ///
    /// # Errors
    ///
    /// - `SubmissionNotFound` if the submission doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn mark_completed(&self, id: &SubmissionId, at: Timestamp) -> Result<bool, DomainError>;
}
