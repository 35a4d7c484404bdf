//! SaveDomainResponsesHandler - Persists one domain's answers.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainId, ItemId, RespondentId, SubmissionId};
use crate::domain::scoring::DomainAnswers;
use crate::domain::submission::{AssessmentError, Submission};
use crate::ports::{ResponseStore, SubmissionRepository};

/// Command to save answers for one domain.
#[derive(Debug, Clone)]
pub struct SaveDomainResponsesCommand {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
    pub domain_id: DomainId,
    /// Raw selections; `None` means the item was left blank.
    pub answers: BTreeMap<ItemId, Option<i64>>,
}

#[derive(Debug, Clone)]
pub struct SaveDomainResponsesResult {
    pub submission: Submission,
    pub saved: usize,
}

/// Handler for saving domain answers.
///
/// Every answer is validated before anything is written; the batch is then
/// stored atomically. Saving identical input twice leaves identical state.
pub struct SaveDomainResponsesHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
}

impl SaveDomainResponsesHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
    ) -> Self {
        Self {
            catalog,
            submissions,
            responses,
        }
    }

    pub async fn handle(
        &self,
        cmd: SaveDomainResponsesCommand,
    ) -> Result<SaveDomainResponsesResult, AssessmentError> {
        let answers = DomainAnswers::validate(&self.catalog, &cmd.domain_id, &cmd.answers)?;

        let submission = self
            .submissions
            .find_by_id(&cmd.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(cmd.submission_id))?;
        submission.authorize(&cmd.respondent_id)?;
        submission.ensure_mutable()?;

        if !answers.is_empty() {
            self.responses
                .save_responses(submission.id(), answers.domain_id(), answers.responses())
                .await?;
        }

        debug!(
            submission_id = %submission.id(),
            domain_id = %answers.domain_id(),
            saved = answers.responses().len(),
            "domain responses saved"
        );

        Ok(SaveDomainResponsesResult {
            saved: answers.responses().len(),
            submission,
        })
    }
}
