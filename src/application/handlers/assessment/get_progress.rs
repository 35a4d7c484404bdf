//! GetProgressHandler - Per-domain progress of a submission.

use std::sync::Arc;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{RespondentId, SubmissionId};
use crate::domain::scoring::ResponseSet;
use crate::domain::submission::{AssessmentError, Submission, SubmissionProgress};
use crate::ports::{DomainCompletionStore, ResponseStore, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct GetProgressQuery {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
}

/// Handler for answered/total counts and completion flags per domain.
pub struct GetProgressHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
    completions: Arc<dyn DomainCompletionStore>,
}

impl GetProgressHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
            catalog,
            submissions,
            responses,
            completions,
        }
    }

    pub async fn handle(&self, query: GetProgressQuery) -> Result<SubmissionProgress, AssessmentError> {
        let submission = self
            .submissions
            .find_by_id(&query.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.submission_id))?;
        submission.authorize(&query.respondent_id)?;

        self.snapshot(&submission).await
    }

    /// Progress of an already authorized submission.
    pub async fn snapshot(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionProgress, AssessmentError> {
        let responses =
            ResponseSet::from_responses(self.responses.load_responses(submission.id()).await?);
        let completed = self
            .completions
            .completed_domains(submission.respondent_id(), submission.id())
            .await?;
        Ok(SubmissionProgress::build(
            &self.catalog,
            submission,
            &responses,
            &completed,
        ))
    }
}
