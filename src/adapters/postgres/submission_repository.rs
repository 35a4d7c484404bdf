//! PostgreSQL implementation of SubmissionRepository.
//!
//! Get-or-create takes a transaction-scoped advisory lock keyed on the
//! respondent, so the lookup and the insert cannot interleave with another
//! caller for the same respondent. Lookups still pick the most recent
//! in-progress row, which leaves duplicates created before the lock existed
//! unreachable but intact.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, RespondentId, SubmissionId, SubmissionStatus, Timestamp,
};
use crate::domain::submission::Submission;
use crate::ports::SubmissionRepository;

const SUBMISSION_COLUMNS: &str = "id, respondent_id, status, started_at, completed_at";

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a new PostgresSubmissionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn get_or_create_in_progress(
        &self,
        respondent_id: &RespondentId,
        now: Timestamp,
    ) -> Result<(Submission, bool), DomainError> {
        let op = "get_or_create_submission";
        let db_err = |e: sqlx::Error| {
            DomainError::database(op, e).with_detail("respondent_id", respondent_id.as_str())
        };

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(respondent_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let existing = sqlx::query(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM submissions
            WHERE respondent_id = $1 AND status = 'in_progress'
            ORDER BY started_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(respondent_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        if let Some(row) = existing {
            tx.commit().await.map_err(db_err)?;
            return Ok((row_to_submission(&row)?, false));
        }

        let submission = Submission::start_at(respondent_id.clone(), now);
        sqlx::query(
            r#"
            INSERT INTO submissions (id, respondent_id, status, started_at, completed_at)
            VALUES ($1, $2, $3, $4, NULL)
            "#,
        )
        .bind(submission.id().as_uuid())
        .bind(submission.respondent_id().as_str())
        .bind(submission.status().as_str())
        .bind(submission.started_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok((submission, true))
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM submissions WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("find_submission", e).with_detail("submission_id", id.to_string())
        })?;

        row.as_ref().map(row_to_submission).transpose()
    }

    async fn find_latest(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {SUBMISSION_COLUMNS}
            FROM submissions
            WHERE respondent_id = $1
            ORDER BY started_at DESC, id DESC
            LIMIT 1
            "#
        ))
        .bind(respondent_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("find_latest_submission", e)
                .with_detail("respondent_id", respondent_id.as_str())
        })?;

        row.as_ref().map(row_to_submission).transpose()
    }

    async fn find_latest_for_respondents(
        &self,
        respondent_ids: &[RespondentId],
    ) -> Result<Vec<Submission>, DomainError> {
        if respondent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = respondent_ids.iter().map(|id| id.to_string()).collect();

        let rows = sqlx::query(&format!(
            r#"
            SELECT DISTINCT ON (respondent_id) {SUBMISSION_COLUMNS}
            FROM submissions
            WHERE respondent_id = ANY($1)
            ORDER BY respondent_id, started_at DESC, id DESC
            "#
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("find_latest_submissions", e))?;

        rows.iter().map(row_to_submission).collect()
    }

    async fn mark_completed(&self, id: &SubmissionId, at: Timestamp) -> Result<bool, DomainError> {
        let db_err = |e: sqlx::Error| {
            DomainError::database("complete_submission", e).with_detail("submission_id", id.to_string())
        };

        let result = sqlx::query(
            r#"
            UPDATE submissions
            SET status = 'completed', completed_at = $2
            WHERE id = $1 AND status = 'in_progress'
            "#,
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        if exists.0 == 0 {
            return Err(DomainError::new(
                ErrorCode::SubmissionNotFound,
                format!("Submission not found: {}", id),
            )
            .with_detail("submission_id", id.to_string()));
        }
        Ok(false)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════════

fn row_to_submission(row: &sqlx::postgres::PgRow) -> Result<Submission, DomainError> {
    let decode = |e: sqlx::Error| DomainError::database("decode_submission", e);

    let id: uuid::Uuid = row.try_get("id").map_err(decode)?;
    let respondent_id: String = row.try_get("respondent_id").map_err(decode)?;
    let status: String = row.try_get("status").map_err(decode)?;
    let started_at: chrono::DateTime<chrono::Utc> = row.try_get("started_at").map_err(decode)?;
    let completed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("completed_at").map_err(decode)?;

    Ok(Submission::reconstitute(
        SubmissionId::from_uuid(id),
        RespondentId::new(respondent_id)?,
        str_to_submission_status(&status)?,
        Timestamp::from_datetime(started_at),
        completed_at.map(Timestamp::from_datetime),
    ))
}

fn str_to_submission_status(s: &str) -> Result<SubmissionStatus, DomainError> {
    SubmissionStatus::parse(s).ok_or_else(|| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid submission status: {}", s),
        )
    })
}
