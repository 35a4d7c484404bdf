//! GetOrganizationRollupHandler - Organization-wide mean scores.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::OrganizationName;
use crate::domain::reporting::{
    latest_per_respondent, OrganizationRollup, ReportingError, RollupBuilder,
};
use crate::domain::scoring::ResponseSet;
use crate::ports::{RespondentDirectory, ResponseStore, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct GetOrganizationRollupQuery {
    pub organization: OrganizationName,
}

/// Handler computing the rollup from each member's latest submission.
///
/// Re-reads the store on every call. Store failures degrade the affected
/// scope to "no data" and are listed in the result instead of failing the
/// request.
pub struct GetOrganizationRollupHandler {
    catalog: Arc<ItemCatalog>,
    directory: Arc<dyn RespondentDirectory>,
    submissions: Arc<dyn SubmissionRepository>,
    responses: Arc<dyn ResponseStore>,
}

impl GetOrganizationRollupHandler {
    pub fn new(
        catalog: Arc<ItemCatalog>,
        directory: Arc<dyn RespondentDirectory>,
        submissions: Arc<dyn SubmissionRepository>,
        responses: Arc<dyn ResponseStore>,
    ) -> Self {
        Self {
            catalog,
            directory,
            submissions,
            responses,
        }
    }

    pub async fn handle(
        &self,
        query: GetOrganizationRollupQuery,
    ) -> Result<OrganizationRollup, ReportingError> {
        let mut builder = RollupBuilder::new(&self.catalog, query.organization.clone());

        let members = match self.directory.members_of(&query.organization).await {
            Ok(members) => members,
            Err(e) => {
                warn!(organization = %query.organization, error = %e, "rollup membership read failed");
                builder.degrade_organization(e.message);
                return Ok(builder.build());
            }
        };

        let latest = match self.submissions.find_latest_for_respondents(&members).await {
            Ok(submissions) => latest_per_respondent(submissions),
            Err(e) => {
                warn!(organization = %query.organization, error = %e, "rollup submission read failed");
                builder.degrade_organization(e.message);
                return Ok(builder.build());
            }
        };

        for submission in latest.values() {
            match self.responses.load_responses(submission.id()).await {
                Ok(rows) => builder.add_submission(submission, &ResponseSet::from_responses(rows)),
                Err(e) => {
                    warn!(
                        submission_id = %submission.id(),
                        respondent_id = %submission.respondent_id(),
                        error = %e,
                        "rollup response read failed"
                    );
                    builder.degrade_submission(submission, e.message);
                }
            }
        }

        let rollup = builder.build();
        info!(
            organization = %rollup.organization,
            respondents = rollup.respondent_count,
            degraded = rollup.degraded.len(),
            "organization rollup computed"
        );
        Ok(rollup)
    }
}
