//! MarkDomainCompleteHandler - Sets a domain's done flag.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{DomainId, RespondentId, SubmissionId};
use crate::domain::submission::AssessmentError;
use crate::ports::DomainCompletionStore;

/// Command to flag a domain done.
#[derive(Debug, Clone)]
pub struct MarkDomainCompleteCommand {
    pub respondent_id: RespondentId,
    pub submission_id: SubmissionId,
    pub domain_id: DomainId,
}

/// Handler for the monotonic completion flag.
///
/// Does not consult the catalog. Callers verify that every item of the
/// domain has a stored score first.
pub struct MarkDomainCompleteHandler {
    completions: Arc<dyn DomainCompletionStore>,
}

impl MarkDomainCompleteHandler {
    pub fn new(completions: Arc<dyn DomainCompletionStore>) -> Self {
        Self { completions }
    }

    pub async fn handle(&self, cmd: MarkDomainCompleteCommand) -> Result<(), AssessmentError> {
        self.completions
            .mark_done(&cmd.respondent_id, &cmd.submission_id, &cmd.domain_id)
            .await?;

        info!(
            submission_id = %cmd.submission_id,
            domain_id = %cmd.domain_id,
            "domain completed"
        );
        Ok(())
    }
}
