//! ComputeSubmissionScoresHandler - Scorecard of one submission.

use std::sync::Arc;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{RespondentProfile, SubmissionId};
use crate::domain::scoring::{ResponseSet, Scorecard};
use crate::domain::submission::{AssessmentError, Submission};
use crate::ports::{RespondentDirectory, ResponseStore, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct ComputeSubmissionScoresQuery {
    pub requester: RespondentProfile,
    pub submission_id: SubmissionId,
}

/// Handler returning every sub-index and domain score of a submission,
/// rounded to two decimals.
///
/// Readable by the owner and by administrators of the owner's organization.
pub struct ComputeSubmissionScoresHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
    directory: Arc<dyn RespondentDirectory>,
}

impl ComputeSubmissionScoresHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
        directory: Arc<dyn RespondentDirectory>,
    ) -> Self {
        Self {
            catalog,
            submissions,
            responses,
            directory,
        }
    }

    pub async fn handle(
        &self,
        query: ComputeSubmissionScoresQuery,
    ) -> Result<Scorecard, AssessmentError> {
        let submission = self
            .submissions
            .find_by_id(&query.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.submission_id))?;
        self.authorize(&query.requester, &submission).await?;

        let responses =
            ResponseSet::from_responses(self.responses.load_responses(submission.id()).await?);
        Ok(Scorecard::compute(&self.catalog, *submission.id(), &responses).rounded())
    }

    async fn authorize(
        &self,
        requester: &RespondentProfile,
        submission: &Submission,
    ) -> Result<(), AssessmentError> {
        if submission.is_owner(&requester.id) {
            return Ok(());
        }
        if !requester.is_administrator() {
            return Err(AssessmentError::Forbidden);
        }
        match self.directory.lookup(submission.respondent_id()).await? {
            Some(owner) if owner.organization == requester.organization => Ok(()),
            _ => Err(AssessmentError::Forbidden),
        }
    }
}
