//! CompleteDomainHandler - Explicit "this domain is done" request.

use std::sync::Arc;

use crate::application::handlers::completion::{
    MarkDomainCompleteCommand, MarkDomainCompleteHandler,
};
use crate::application::handlers::submission::CompleteSubmissionHandler;
use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainId, RespondentId, SubmissionId};
use crate::domain::scoring::ResponseSet;
use crate::domain::submission::AssessmentError;
use crate::ports::{DomainCompletionStore, ResponseStore, SubmissionRepository};

use super::{DomainOutcome, GetProgressHandler};

#[derive(Debug, Clone)]
pub struct CompleteDomainCommand {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
    pub domain_id: DomainId,
}

/// Handler that checks the catalog before flagging a domain done.
///
/// Rejected with the list of unanswered items while any item of the domain
/// has no stored score.
pub struct CompleteDomainHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
    mark: MarkDomainCompleteHandler,
    complete: CompleteSubmissionHandler,
    progress: GetProgressHandler,
}

impl CompleteDomainHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
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

    pub async fn handle(&self, cmd: CompleteDomainCommand) -> Result<DomainOutcome, AssessmentError> {
        let domain = self.catalog.domain(&cmd.domain_id).ok_or_else(|| {
            AssessmentError::validation("domain_id", format!("Unknown domain: {}", cmd.domain_id))
        })?;

        let mut submission = self
            .submissions
            .find_by_id(&cmd.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(cmd.submission_id))?;
        submission.authorize(&cmd.respondent_id)?;
        submission.ensure_mutable()?;

        let stored =
            ResponseSet::from_responses(self.responses.load_responses(submission.id()).await?);
        let missing = stored.missing_in(domain);
        if !missing.is_empty() {
            return Err(AssessmentError::incomplete_domain(cmd.domain_id, missing));
        }

        self.mark
            .handle(MarkDomainCompleteCommand {
                respondent_id: cmd.respondent_id,
                submission_id: cmd.submission_id,
                domain_id: cmd.domain_id.clone(),
            })
            .await?;

        let submission_completed = self.complete.complete_if_ready(&submission).await?;
        if submission_completed {
            if let Some(current) = self.submissions.find_by_id(&cmd.submission_id).await? {
                submission = current;
            }
        }
        let progress = self.progress.snapshot(&submission).await?;

        Ok(DomainOutcome {
            domain_id: cmd.domain_id,
            saved: 0,
            domain_done: true,
            submission_completed,
            progress,
        })
    }
}
