//! SubmitDomainHandler - Saves a domain's answers and applies completion rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::completion::{
    MarkDomainCompleteCommand, MarkDomainCompleteHandler,
};
use crate::application::handlers::responses::{
    SaveDomainResponsesCommand, SaveDomainResponsesHandler,
};
use crate::application::handlers::submission::CompleteSubmissionHandler;
use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainId, ItemId, RespondentId, SubmissionId};
use crate::domain::scoring::ResponseSet;
use crate::domain::submission::{AssessmentError, Submission, SubmissionProgress};
use crate::ports::{DomainCompletionStore, ResponseStore, SubmissionRepository};

use super::GetProgressHandler;

#[derive(Debug, Clone)]
pub struct SubmitDomainCommand {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
    pub domain_id: DomainId,
    pub answers: BTreeMap<ItemId, Option<i64>>,
}

/// What a domain save or completion request changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOutcome {
    pub domain_id: DomainId,
    /// Responses written by this call.
    pub saved: usize,
    /// The domain's done flag is set (now or earlier).
    pub domain_done: bool,
    /// This call moved the submission to completed.
    pub submission_completed: bool,
    pub progress: SubmissionProgress,
}

/// Handler for the respondent's "save this domain" action.
///
/// After the batch is stored, the domain is flagged done once every one of
/// its items has a stored score, and the submission completes once every
/// catalog domain is flagged.
pub struct SubmitDomainHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
    save: SaveDomainResponsesHandler,
    mark: MarkDomainCompleteHandler,
    complete: CompleteSubmissionHandler,
    progress: GetProgressHandler,
}

impl SubmitDomainHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
            save: SaveDomainResponsesHandler::new(
                catalog.clone(),
                submissions.clone(),
                responses.clone(),
            ),
            mark: MarkDomainCompleteHandler::new(completions.clone()),
            complete: CompleteSubmissionHandler::new(
                catalog.clone(),
                submissions.clone(),
                completions.clone(),
            ),
            progress: GetProgressHandler::new(
                catalog.clone(),
                submissions.clone(),
                responses.clone(),
                completions,
            ),
            catalog,
            submissions,
            responses,
        }
    }

    pub async fn handle(&self, cmd: SubmitDomainCommand) -> Result<DomainOutcome, AssessmentError> {
        let saved = self
            .save
            .handle(SaveDomainResponsesCommand {
                respondent_id: cmd.respondent_id.clone(),
                submission_id: cmd.submission_id,
                domain_id: cmd.domain_id.clone(),
                answers: cmd.answers,
            })
            .await?;

        let domain = self
            .catalog
            .domain(&cmd.domain_id)
            .ok_or_else(|| AssessmentError::validation("domain_id", "Unknown domain"))?;
        let stored = ResponseSet::from_responses(
            self.responses
                .load_responses(saved.submission.id())
                .await?,
        );

        if stored.missing_in(domain).is_empty() {
            self.mark
                .handle(MarkDomainCompleteCommand {
                    respondent_id: cmd.respondent_id,
                    submission_id: cmd.submission_id,
                    domain_id: cmd.domain_id.clone(),
                })
                .await?;
        }

        let submission_completed = self.complete.complete_if_ready(&saved.submission).await?;
        let progress = self.current_progress(&saved.submission).await?;
        let domain_done = progress
            .domains
            .iter()
            .any(|d| d.domain_id == cmd.domain_id && d.done);

        Ok(DomainOutcome {
            domain_id: cmd.domain_id,
            saved: saved.saved,
            domain_done,
            submission_completed,
            progress,
        })
    }

    async fn current_progress(
        &self,
        submission: &Submission,
    ) -> Result<SubmissionProgress, AssessmentError> {
        let current = self
            .submissions
            .find_by_id(submission.id())
            .await?
            .unwrap_or_else(|| submission.clone());
        self.progress.snapshot(&current).await
    }
}
