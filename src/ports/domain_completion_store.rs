//! Domain completion tracker port.

use std::collections::BTreeSet;

use crate::domain::foundation::{DomainError, DomainId, RespondentId, SubmissionId};
use async_trait::async_trait;

/// Monotonic per-(respondent, submission, domain) "done" flags.
///
/// Performs no catalog cross-check: callers verify every item is answered
/// before marking a domain.
#[async_trait]
pub trait DomainCompletionStore: Send + Sync {
    /// Sets the flag. Never clears it; repeating the call is harmless.
    async fn mark_done(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
        domain_id: &DomainId,
    ) -> Result<(), DomainError>;

    /// Domains flagged done for the submission.
    async fn completed_domains(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
    ) -> Result<BTreeSet<DomainId>, DomainError>;
}
