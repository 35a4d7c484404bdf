//! GetLatestStatusHandler - Classifies a respondent's most recent submission.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::RespondentId;
use crate::domain::submission::{AssessmentError, LatestSubmissionStatus};
use crate::ports::{DomainCompletionStore, SubmissionRepository};

/// Query for a respondent's latest submission status.
#[derive(Debug, Clone)]
pub struct GetLatestStatusQuery {
    pub respondent_id: RespondentId,
}

/// Handler returning NotStarted, InProgress(x of N), or Completed.
pub struct GetLatestStatusHandler {
    catalog: Arc<ItemCatalog>,
    submissions: Arc<dyn SubmissionRepository>,
    completions: Arc<dyn DomainCompletionStore>,
}

impl GetLatestStatusHandler {
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
        query: GetLatestStatusQuery,
    ) -> Result<LatestSubmissionStatus, AssessmentError> {
        let latest = self.submissions.find_latest(&query.respondent_id).await?;

        let completed = match &latest {
            Some(s) if !s.is_completed() => {
                self.completions
                    .completed_domains(&query.respondent_id, s.id())
                    .await?
            }
            _ => BTreeSet::new(),
        };

        Ok(LatestSubmissionStatus::classify(
            &self.catalog,
            latest.as_ref(),
            &completed,
        ))
    }
}
