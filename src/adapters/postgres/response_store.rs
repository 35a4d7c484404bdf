//! PostgreSQL implementation of ResponseStore.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, DomainId, ItemId, NormalizedScore, RawScore, SubmissionId,
};
use crate::domain::scoring::StoredResponse;
use crate::ports::ResponseStore;

/// PostgreSQL implementation of ResponseStore.
///
/// A domain batch is written in one transaction with one upsert per item.
#[derive(Clone)]
pub struct PostgresResponseStore {
    pool: PgPool,
}

impl PostgresResponseStore {
    /// Creates a new PostgresResponseStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseStore for PostgresResponseStore {
    async fn save_responses(
        &self,
        submission_id: &SubmissionId,
        domain_id: &DomainId,
        responses: &[StoredResponse],
    ) -> Result<(), DomainError> {
        let db_err = |e: sqlx::Error| {
            DomainError::database("save_responses", e)
                .with_detail("submission_id", submission_id.to_string())
                .with_detail("domain_id", domain_id.as_str())
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for response in responses {
            sqlx::query(
                r#"
                INSERT INTO responses (submission_id, item_id, raw_score, normalized_score, updated_at)
                VALUES ($1, $2, $3, $4, NOW())
                ON CONFLICT (submission_id, item_id) DO UPDATE SET
                    raw_score = EXCLUDED.raw_score,
                    normalized_score = EXCLUDED.normalized_score,
                    updated_at = NOW()
                "#,
            )
            .bind(submission_id.as_uuid())
            .bind(response.item_id.as_str())
            .bind(response.raw_score.value() as i16)
            .bind(response.normalized_score.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_err(e).with_detail("item_id", response.item_id.as_str()))?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn load_responses(
        &self,
        submission_id: &SubmissionId,
    ) -> Result<Vec<StoredResponse>, DomainError> {
        let db_err = |e: sqlx::Error| {
            DomainError::database("load_responses", e)
                .with_detail("submission_id", submission_id.to_string())
        };

        let rows = sqlx::query(
            r#"
            SELECT item_id, raw_score, normalized_score
            FROM responses
            WHERE submission_id = $1
            ORDER BY item_id
            "#,
        )
        .bind(submission_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter()
            .map(|row| -> Result<StoredResponse, DomainError> {
                let item_id: String = row.try_get("item_id").map_err(db_err)?;
                let raw_score: i16 = row.try_get("raw_score").map_err(db_err)?;
                let normalized_score: f64 = row.try_get("normalized_score").map_err(db_err)?;
                Ok(StoredResponse {
                    item_id: ItemId::new(item_id)?,
                    raw_score: RawScore::try_new(raw_score as i64)?,
                    normalized_score: NormalizedScore::try_new(normalized_score)?,
                })
            })
            .collect()
    }
}
