//! PostgreSQL implementation of RespondentDirectory.
//!
//! Reads the `respondents` table kept by the external registration process.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    DomainError, ErrorCode, OrganizationName, RespondentId, RespondentProfile, Role,
};
use crate::ports::RespondentDirectory;

/// PostgreSQL implementation of RespondentDirectory.
#[derive(Clone)]
pub struct PostgresRespondentDirectory {
    pool: PgPool,
}

impl PostgresRespondentDirectory {
    /// Creates a new PostgresRespondentDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RespondentDirectory for PostgresRespondentDirectory {
    async fn lookup(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<RespondentProfile>, DomainError> {
        let db_err = |e: sqlx::Error| {
            DomainError::database("lookup_respondent", e)
                .with_detail("respondent_id", respondent_id.as_str())
        };

        let row = sqlx::query(
            r#"
            SELECT id, display_name, organization, role
            FROM respondents
            WHERE id = $1
            "#,
        )
        .bind(respondent_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id").map_err(db_err)?;
        let display_name: Option<String> = row.try_get("display_name").map_err(db_err)?;
        let organization: String = row.try_get("organization").map_err(db_err)?;
        let role: String = row.try_get("role").map_err(db_err)?;

        Ok(Some(RespondentProfile::new(
            RespondentId::new(id)?,
            display_name,
            OrganizationName::new(organization)?,
            str_to_role(&role)?,
        )))
    }

    async fn team_of(
        &self,
        administrator_id: &RespondentId,
    ) -> Result<Vec<RespondentId>, DomainError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT member.id
            FROM respondents admin
            JOIN respondents member ON member.organization = admin.organization
            WHERE admin.id = $1 AND member.id <> admin.id
            ORDER BY member.id
            "#,
        )
        .bind(administrator_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database("find_team", e)
                .with_detail("respondent_id", administrator_id.as_str())
        })?;

        to_respondent_ids(rows)
    }

    async fn members_of(
        &self,
        organization: &OrganizationName,
    ) -> Result<Vec<RespondentId>, DomainError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT id FROM respondents WHERE organization = $1 ORDER BY id")
                .bind(organization.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database("find_organization_members", e)
                        .with_detail("organization", organization.as_str())
                })?;

        to_respondent_ids(rows)
    }
}

fn to_respondent_ids(rows: Vec<(String,)>) -> Result<Vec<RespondentId>, DomainError> {
    rows.into_iter()
        .map(|(id,)| RespondentId::new(id).map_err(DomainError::from))
        .collect()
}

fn str_to_role(s: &str) -> Result<Role, DomainError> {
    Role::parse(s)
        .ok_or_else(|| DomainError::new(ErrorCode::DatabaseError, format!("Invalid role: {}", s)))
}
