//! Respondent directory port (read-only identity and membership lookup).
//!
//! Respondents are registered by an external process; this core never
//! writes them.

use crate::domain::foundation::{DomainError, OrganizationName, RespondentId, RespondentProfile};
use async_trait::async_trait;

#[async_trait]
pub trait RespondentDirectory: Send + Sync {
    /// Resolves role, organization, and display name.
    async fn lookup(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<RespondentProfile>, DomainError>;

    /// Members of the administrator's organization, excluding the
    /// administrator, ordered by id.
    async fn team_of(&self, administrator_id: &RespondentId)
        -> Result<Vec<RespondentId>, DomainError>;

    /// Every respondent of an organization, ordered by id.
    async fn members_of(
        &self,
        organization: &OrganizationName,
    ) -> Result<Vec<RespondentId>, DomainError>;
}
