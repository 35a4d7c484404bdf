//! CompleteSubmissionHandler - The in-progress to completed transition.

use std::sync::Arc;

use tracing::info;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{RespondentId, SubmissionId, Timestamp};
use crate::domain::submission::{all_domains_done, domains_done, AssessmentError, Submission};
use crate::ports::{DomainCompletionStore, SubmissionRepository};

/// Command to complete a submission.
#[derive(Debug, Clone)]
pub struct CompleteSubmissionCommand {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
}

/// Outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteSubmissionResult {
    pub submission_id: SubmissionId,
    /// False when the submission was already completed.
    pub newly_completed: bool,
}

/// Handler for completing submissions.
///
/// Completion happens only when every catalog domain is flagged done.
/// Completing twice is a no-op.
pub struct CompleteSubmissionHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    completions: Arc<dyn DomainCompletionStore>,
}

impl CompleteSubmissionHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
            catalog,
            submissions,
            completions,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteSubmissionCommand,
    ) -> Result<CompleteSubmissionResult, AssessmentError> {
        let submission = self
            .submissions
            .find_by_id(&cmd.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(cmd.submission_id))?;
        submission.authorize(&cmd.respondent_id)?;

        if submission.is_completed() {
            return Ok(CompleteSubmissionResult {
                submission_id: cmd.submission_id,
                newly_completed: false,
            });
        }

        let completed = self
            .completions
            .completed_domains(&cmd.respondent_id, &cmd.submission_id)
            .await?;
        if !all_domains_done(&self.catalog, &completed) {
            return Err(AssessmentError::invalid_state(format!(
                "{} of {} domains done",
                domains_done(&self.catalog, &completed),
                self.catalog.domain_count()
            )));
        }

        let newly_completed = self.mark_completed(&submission).await?;
        Ok(CompleteSubmissionResult {
            submission_id: cmd.submission_id,
            newly_completed,
        })
    }

    /// Completes the submission if every catalog domain is flagged done.
    ///
    /// Returns true only when this call performed the transition.
    pub async fn complete_if_ready(&self, submission: &Submission) -> Result<bool, AssessmentError> {
        if submission.is_completed() {
            return Ok(false);
        }
        let completed = self
            .completions
            .completed_domains(submission.respondent_id(), submission.id())
            .await?;
        if !all_domains_done(&self.catalog, &completed) {
            return Ok(false);
        }
        self.mark_completed(submission).await
    }

    async fn mark_completed(&self, submission: &Submission) -> Result<bool, AssessmentError> {
        let newly_completed = self
            .submissions
            .mark_completed(submission.id(), Timestamp::now())
            .await?;
        if newly_completed {
            info!(
                submission_id = %submission.id(),
                respondent_id = %submission.respondent_id(),
                "submission completed"
            );
        }
        Ok(newly_completed)
    }
}
