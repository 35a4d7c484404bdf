//! GetCompletedDomainsHandler - Domains flagged done for a submission.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::foundation::{DomainId, RespondentId, SubmissionId};
use crate::domain::submission::AssessmentError;
use crate::ports::DomainCompletionStore;

#[derive(Debug, Clone)]
pub struct GetCompletedDomainsQuery {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
}

pub struct GetCompletedDomainsHandler {
    completions: Arc<dyn DomainCompletionStore>,
}

impl GetCompletedDomainsHandler {
    pub fn new(completions: Arc<dyn DomainCompletionStore>) -> Self {
        Self { completions }
    }

    pub async fn handle(
        &self,
        query: GetCompletedDomainsQuery,
    ) -> Result<BTreeSet<DomainId>, AssessmentError> {
        Ok(self
            .completions
            .completed_domains(&query.respondent_id, &query.submission_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentStore;

    #[tokio::test]
    async fn flags_are_scoped_to_the_submission() {
        let store = Arc::new(InMemoryAssessmentStore::new());
        let ada = RespondentId::new("ada@example.com").unwrap();
        let first = SubmissionId::new();
        let second = SubmissionId::new();
        store
            .mark_done(&ada, &first, &DomainId::new("alignment").unwrap())
            .await
            .unwrap();

        let handler = GetCompletedDomainsHandler::new(store);
        let for_first = handler
            .handle(GetCompletedDomainsQuery {
                respondent_id: ada.clone(),
                submission_id: first,
            })
            .await
            .unwrap();
        let for_second = handler
            .handle(GetCompletedDomainsQuery {
                respondent_id: ada,
                submission_id: second,
            })
            .await
            .unwrap();

        assert_eq!(for_first.len(), 1);
        assert!(for_second.is_empty());
    }
}
