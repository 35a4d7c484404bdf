//! PostgreSQL implementation of DomainCompletionStore.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, DomainId, RespondentId, SubmissionId};
use crate::ports::DomainCompletionStore;

/// PostgreSQL implementation of DomainCompletionStore.
///
/// The upsert only ever writes `done = TRUE`, so a flag cannot be cleared.
#[derive(Clone)]
pub struct PostgresDomainCompletionStore {
    pool: PgPool,
}

impl PostgresDomainCompletionStore {
    /// Creates a new PostgresDomainCompletionStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainCompletionStore for PostgresDomainCompletionStore {
    async fn mark_done(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
        domain_id: &DomainId,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO domain_completion (respondent_id, submission_id, domain_id, done, updated_at)
            VALUES ($1, $2, $3, TRUE, NOW())
            ON CONFLICT (respondent_id, submission_id, domain_id) DO UPDATE SET
                done = TRUE,
                updated_at = NOW()
            "#,
        )
        .bind(respondent_id.as_str())
        .bind(submission_id.as_uuid())
        .bind(domain_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("mark_domain_complete", e)
                .with_detail("submission_id", submission_id.to_string())
                .with_detail("domain_id", domain_id.as_str())
        })?;

        Ok(())
    }

    async fn completed_domains(
        &self,
        respondent_id: &RespondentId,
        submission_id: &SubmissionId,
    ) -> Result<BTreeSet<DomainId>, DomainError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT domain_id
            FROM domain_completion
            WHERE respondent_id = $1 AND submission_id = $2 AND done
            "#,
        )
        .bind(respondent_id.as_str())
        .bind(submission_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("get_completed_domains", e)
                .with_detail("submission_id", submission_id.to_string())
        })?;

        rows.into_iter()
            .map(|(domain_id,)| DomainId::new(domain_id).map_err(DomainError::from))
            .collect()
    }
}
