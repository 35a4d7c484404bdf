//! LoadResponsesHandler - Previously saved answers of a submission.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{ItemId, RespondentId, SubmissionId};
use crate::domain::scoring::{ItemAnswer, ResponseSet};
use crate::domain::submission::{AssessmentError, Submission};
use crate::ports::{ResponseStore, SubmissionRepository};

/// Query for the saved answers of a submission.
#[derive(Debug, Clone)]
pub struct LoadResponsesQuery {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
}

#[derive(Debug, Clone)]
pub struct LoadResponsesResult {
    pub submission: Submission,
    pub responses: ResponseSet,
    /// Every catalog item; never-answered items are `Unanswered`, not zero.
    pub answers: BTreeMap<ItemId, ItemAnswer>,
}

/// Handler that reconstructs the answer state of a submission.
pub struct LoadResponsesHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
}

impl LoadResponsesHandler {
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
        query: LoadResponsesQuery,
    ) -> Result<LoadResponsesResult, AssessmentError> {
        let submission = self
            .submissions
            .find_by_id(&query.submission_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.submission_id))?;
        submission.authorize(&query.respondent_id)?;

        let responses =
            ResponseSet::from_responses(self.responses.load_responses(submission.id()).await?);
        let answers = self
            .catalog
            .domains()
            .iter()
            .flat_map(|d| d.item_ids())
            .map(|id| (id.clone(), responses.answer(id)))
            .collect();

        Ok(LoadResponsesResult {
            submission,
            responses,
            answers,
        })
    }
}
