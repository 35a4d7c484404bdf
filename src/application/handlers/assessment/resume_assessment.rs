//! ResumeAssessmentHandler - Builds the client-held context for a respondent.

use std::sync::Arc;

use crate::application::handlers::submission::{
    GetOrCreateSubmissionCommand, GetOrCreateSubmissionHandler,
};
use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::RespondentId;
use crate::domain::scoring::ResponseSet;
use crate::domain::submission::{AssessmentContext, AssessmentError};
use crate::ports::{DomainCompletionStore, ResponseStore, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct ResumeAssessmentCommand {
    pub respondent_id: RespondentId,
}

/// Handler that starts or resumes the respondent's active submission.
///
/// The returned context replaces any per-session state on the server: the
/// client keeps it and sends the submission id back with each save.
pub struct ResumeAssessmentHandler {
    catalog: Arc<ItemCatalog>,
    get_or_create: GetOrCreateSubmissionHandler,
    responses: Arc<dyn ResponseStore>,
    completions: Arc<dyn DomainCompletionStore>,
}

impl ResumeAssessmentHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
            catalog,
            get_or_create: GetOrCreateSubmissionHandler::new(submissions),
            responses,
            completions,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResumeAssessmentCommand,
    ) -> Result<AssessmentContext, AssessmentError> {
        let active = self
            .get_or_create
            .handle(GetOrCreateSubmissionCommand {
                respondent_id: cmd.respondent_id.clone(),
            })
            .await?;
        let submission = active.submission;

        let responses =
            ResponseSet::from_responses(self.responses.load_responses(submission.id()).await?);
        let completed = self
            .completions
            .completed_domains(&cmd.respondent_id, submission.id())
            .await?;

        Ok(AssessmentContext::build(
            &self.catalog,
            &submission,
            active.created,
            &responses,
            completed,
        ))
    }
}
