//! Response store port.

use crate::domain::foundation::{DomainError, DomainId, SubmissionId};
use crate::domain::scoring::StoredResponse;
use async_trait::async_trait;

/// Persists one normalized score per (submission, item).
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Upserts a batch of responses for one domain.
    ///
    /// The batch is written atomically: on failure no row of it is visible.
    /// Re-saving an item replaces its scores in place.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` with `operation`, `submission_id`, `domain_id`
    async fn save_responses(
        &self,
        submission_id: &SubmissionId,
        domain_id: &DomainId,
        responses: &[StoredResponse],
    ) -> Result<(), DomainError>;

    /// Every stored response of a submission.
    async fn load_responses(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<StoredResponse>, DomainError>;
}
