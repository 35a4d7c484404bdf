//! In-memory assessment store.
//!
//! Implements the submission, response, and domain completion ports over one
//! shared state. Useful for tests and local development.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, DomainId, ErrorCode, ItemId, RespondentId, SubmissionId, SubmissionStatus,
    Timestamp,
};
use crate::domain::scoring::StoredResponse;
use crate::domain::submission::Submission;
use crate::ports::{DomainCompletionStore, ResponseStore, SubmissionRepository};

#[derive(Debug, Default)]
struct StoreState {
    submissions: HashMap<SubmissionId, Submission>,
    responses: HashMap<SubmissionId, BTreeMap<ItemId, StoredResponse>>,
    completions: HashSet<(RespondentId, SubmissionId, DomainId)>,
    failing_loads: HashSet<SubmissionId>,
}

impl StoreState {
    fn latest_where(
        &self,
        respondent_id: &RespondentId,
        keep: impl Fn(&Submission) -> bool,
    ) -> Option<&Submission> {
        self.submissions
            .values()
            .filter(|s| s.is_owner(respondent_id) && keep(s))
            .max_by(|a, b| a.recency_cmp(b))
    }
}

/// In-memory implementation of the three store ports.
///
/// Get-or-create runs under a single write lock, so concurrent callers for
/// the same respondent always observe one in-progress submission.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a submission as-is (test seeding).
    pub async fn insert_submission(&self, submission: Submission) {
        self.state
            .write()
            .await
            .submissions
            .insert(*submission.id(), submission);
    }

    /// Number of submissions stored for a respondent.
    pub async fn submission_count(&self, respondent_id: &RespondentId) -> usize {
        self.state
            .read()
            .await
            .submissions
            .values()
            .filter(|s| s.is_owner(respondent_id))
            .count()
    }

    /// Number of response rows stored for a submission.
    pub async fn response_count(&self, submission_id: &SubmissionId) -> usize {
        self.state
            .read()
            .await
            .responses
            .get(submission_id)
            .map_or(0, BTreeMap::len)
    }

    /// Makes every later `load_responses` for the submission fail with a
    /// database error.
    pub async fn fail_response_loads(&self, submission_id: SubmissionId) {
        self.state.write().await.failing_loads.insert(submission_id);
    }
}

#[async_trait]
impl SubmissionRepository for InMemoryAssessmentStore {
    async fn get_or_create_in_progress(
        &self,
        respondent_id: &RespondentId,
        now: Timestamp,
    ) -> Result<(Submission, bool), DomainError> {
        let mut state = self.state.write().await;
        if let Some(existing) =
            state.latest_where(respondent_id, |s| s.status() == SubmissionStatus::InProgress)
        {
            return Ok((existing.clone(), false));
        }
        let submission = Submission::start_at(respondent_id.clone(), now);
        state.submissions.insert(*submission.id(), submission.clone());
        Ok((submission, true))
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        Ok(self.state.read().await.submissions.get(id).cloned())
    }

    async fn find_latest(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<Submission>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .latest_where(respondent_id, |_| true)
            .cloned())
    }

    async fn find_latest_for_respondents(
        &self,
        respondent_ids: &[RespondentId],
    ) -> Result<Vec<Submission>, DomainError> {
        let state = self.state.read().await;
        Ok(respondent_ids
            .iter()
            .filter_map(|id| state.latest_where(id, |_| true).cloned())
            .collect())
    }

    async fn mark_completed(&self, id: &SubmissionId, at: Timestamp) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        let submission = state.submissions.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SubmissionNotFound, "Submission not found")
                .with_detail("submission_id", id.to_string())
        })?;
        submission.complete(at)
    }
}

#[async_trait]
impl ResponseStore for InMemoryAssessmentStore {
    async fn save_responses(
        &self,
        submission_id: &SubmissionId,
        _domain_id: &DomainId,
        responses: &[StoredResponse],
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let rows = state.responses.entry(*submission_id).or_default();
        for response in responses {
            rows.insert(response.item_id.clone(), response.clone());
        }
        Ok(())
    }

    async fn load_responses(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let state = self.state.read().await;
        if state.failing_loads.contains(submission_id) {
            return Err(DomainError::database("load_responses", "injected failure")
                .with_detail("submission_id", submission_id.to_string()));
        }
        Ok(state
            .responses
            .get(submission_id)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl DomainCompletionStore for InMemoryAssessmentStore {
    async fn mark_done(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
        domain_id: &DomainId,
    ) -> Result<(), DomainError> {
        self.state.write().await.completions.insert((
            respondent_id.clone(),
            *submission_id,
            domain_id.clone(),
        ));
        Ok(())
    }

    async fn completed_domains(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
    ) -> Result<BTreeSet<DomainId>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .completions
            .iter()
            .filter(|(r, s, _)| r == respondent_id && s == submission_id)
            .map(|(_, _, d)| d.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RawScore;

    fn ada() -> RespondentId {
        RespondentId::new("ada@example.com").unwrap()
    }

    fn response(item: &str, raw: i64) -> StoredResponse {
        StoredResponse::new(ItemId::new(item).unwrap(), RawScore::try_new(raw).unwrap())
    }

    #[tokio::test]
    async fn get_or_create_reuses_in_progress_submission() {
        let store = InMemoryAssessmentStore::new();
        let (first, created) = store
            .get_or_create_in_progress(&ada(), Timestamp::now())
            .await
            .unwrap();
        let (second, created_again) = store
            .get_or_create_in_progress(&ada(), Timestamp::now())
            .await
            .unwrap();

        assert!(created);
        assert!(!created_again);
        assert_eq!(first.id(), second.id());
        assert_eq!(store.submission_count(&ada()).await, 1);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_yields_one_submission() {
        let store = InMemoryAssessmentStore::new();
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .get_or_create_in_progress(&ada(), Timestamp::now())
                        .await
                        .unwrap()
                        .0
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(*task.await.unwrap().id());
        }
        assert_eq!(ids.len(), 1);
        assert_eq!(store.submission_count(&ada()).await, 1);
    }

    #[tokio::test]
    async fn completed_submission_starts_a_new_one() {
        let store = InMemoryAssessmentStore::new();
        let (first, _) = store
            .get_or_create_in_progress(&ada(), Timestamp::now())
            .await
            .unwrap();
        assert!(store.mark_completed(first.id(), Timestamp::now()).await.unwrap());
        assert!(!store.mark_completed(first.id(), Timestamp::now()).await.unwrap());

        let (second, created) = store
            .get_or_create_in_progress(&ada(), Timestamp::now().plus_secs(1))
            .await
            .unwrap();
        assert!(created);
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn save_responses_upserts_per_item() {
        let store = InMemoryAssessmentStore::new();
        let id = SubmissionId::new();
        let domain = DomainId::new("alignment").unwrap();

        store
            .save_responses(&id, &domain, &[response("AL01", 2), response("AL02", 3)])
            .await
            .unwrap();
        store
            .save_responses(&id, &domain, &[response("AL01", 7)])
            .await
            .unwrap();

        let loaded = store.load_responses(&id).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].raw_score.value(), 7);
        assert_eq!(loaded[0].normalized_score.value(), 100.0);
    }

    #[tokio::test]
    async fn mark_completed_unknown_submission_fails() {
        let store = InMemoryAssessmentStore::new();
        let err = store
            .mark_completed(&SubmissionId::new(), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionNotFound);
    }

    #[tokio::test]
    async fn injected_load_failure_is_a_database_error() {
        let store = InMemoryAssessmentStore::new();
        let id = SubmissionId::new();
        store.fail_response_loads(id).await;

        let err = store.load_responses(&id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.detail("operation"), Some("load_responses"));
    }
}
