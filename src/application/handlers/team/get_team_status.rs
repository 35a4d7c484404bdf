//! GetTeamStatusHandler - Status of every member of an administrator's team.

use std::sync::Arc;

use crate::application::handlers::submission::{GetLatestStatusHandler, GetLatestStatusQuery};
use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{RespondentId, RespondentProfile};
use crate::domain::reporting::{MemberStatus, ReportingError, TeamStatusReport};
use crate::ports::{DomainCompletionStore, RespondentDirectory, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct GetTeamStatusQuery {
    pub administrator_id: RespondentId,
}

/// Read-only handler classifying each team member as not started, in
/// progress (x of N domains), or completed.
///
/// Store failures are propagated; a partial team list would misreport the
/// completed count.
pub struct GetTeamStatusHandler {
    directory: Arc<dyn RespondentDirectory>,
    latest_status: GetLatestStatusHandler,
}

impl GetTeamStatusHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        directory: Arc<dyn RespondentDirectory>,
        submissions: Arc<dyn SubmissionRepository>,
        completions: Arc<dyn DomainCompletionStore>,
    ) -> Self {
        Self {
            directory,
            latest_status: GetLatestStatusHandler::new(catalog, submissions, completions),
        }
    }

    pub async fn handle(&self, query: GetTeamStatusQuery) -> Result<TeamStatusReport, ReportingError> {
        let administrator = self.resolve_administrator(&query.administrator_id).await?;
        let team = self.directory.team_of(&administrator.id).await?;

        let mut members = Vec::with_capacity(team.len());
        for member_id in team {
            let display_name = self
                .directory
                .lookup(&member_id)
                .await?
                .map(|p| p.display_name_or_id().to_string())
                .unwrap_or_else(|| member_id.to_string());
            let status = self
                .latest_status
                .handle(GetLatestStatusQuery {
                    respondent_id: member_id.clone(),
                })
                .await?;
            members.push(MemberStatus {
                respondent_id: member_id,
                display_name,
                status,
            });
        }

        Ok(TeamStatusReport::from_members(members))
    }

    async fn resolve_administrator(
        &self,
        administrator_id: &RespondentId,
    ) -> Result<RespondentProfile, ReportingError> {
        let profile = self
            .directory
            .lookup(administrator_id)
            .await?
            .ok_or_else(|| ReportingError::RespondentNotFound(administrator_id.clone()))?;
        if !profile.is_administrator() {
            return Err(ReportingError::NotAdministrator(administrator_id.clone()));
        }
        Ok(profile)
    }
}
