//! GetOrCreateSubmissionHandler - Returns the respondent's active submission.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{RespondentId, Timestamp};
use crate::domain::submission::{AssessmentError, Submission};
use crate::ports::SubmissionRepository;

/// Command to get or create the active submission.
#[derive(Debug, Clone)]
pub struct GetOrCreateSubmissionCommand {
    pub respondent_id: RespondentId,
}

/// The active submission and whether this call created it.
#[derive(Debug, Clone)]
pub struct GetOrCreateSubmissionResult {
    pub submission: Submission,
    pub created: bool,
}

/// Handler for resolving the single in-progress submission of a respondent.
///
/// A store failure during the lookup is surfaced as an error, never
/// treated as "no submission yet".
pub struct GetOrCreateSubmissionHandler {
    submissions: Arc<dyn SubmissionRepository>,
}

impl GetOrCreateSubmissionHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    pub async fn handle(
        &self,
        cmd: GetOrCreateSubmissionCommand,
    ) -> Result<GetOrCreateSubmissionResult, AssessmentError> {
        let (submission, created) = self
            .submissions
            .get_or_create_in_progress(&cmd.respondent_id, Timestamp::now())
            .await?;

        if created {
            info!(
                submission_id = %submission.id(),
                respondent_id = %cmd.respondent_id,
                "submission created"
            );
        }

        Ok(GetOrCreateSubmissionResult {
            submission,
            created,
        })
    }
}
