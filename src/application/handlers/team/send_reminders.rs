//! SendRemindersHandler - Nudges team members who have not completed.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::RespondentId;
use crate::domain::reporting::ReportingError;
use crate::ports::{Notification, NotificationDispatcher};

use super::{GetTeamStatusHandler, GetTeamStatusQuery};

const REMINDER_SUBJECT: &str = "Reminder: complete your assessment";

#[derive(Debug, Clone)]
pub struct SendRemindersCommand {
    pub administrator_id: RespondentId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRemindersResult {
    /// Members a reminder was dispatched to.
    pub targeted: Vec<RespondentId>,
}

/// Handler that dispatches one reminder per incomplete team member.
///
/// Dispatch is fire-and-forget: each send runs on its own task, failures
/// are logged, and the request never waits for delivery.
pub struct SendRemindersHandler {
    team_status: Arc<GetTeamStatusHandler>,
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl SendRemindersHandler {
    pub fn new(
        team_status: Arc<GetTeamStatusHandler>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        Self {
            team_status,
            dispatcher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendRemindersCommand,
    ) -> Result<SendRemindersResult, ReportingError> {
        let report = self
            .team_status
            .handle(GetTeamStatusQuery {
                administrator_id: cmd.administrator_id.clone(),
            })
            .await?;

        let mut targeted = Vec::new();
        for member in report.reminder_targets() {
            let notification = Notification {
                recipient: member.respondent_id.clone(),
                subject: REMINDER_SUBJECT.to_string(),
                body: format!(
                    "Hi {}, your assessment is {}. Please finish it when you can.",
                    member.display_name,
                    member.status.label().to_lowercase()
                ),
            };
            let dispatcher = self.dispatcher.clone();
            tokio::spawn(async move {
                let recipient = notification.recipient.clone();
                if let Err(e) = dispatcher.dispatch(notification).await {
                    warn!(recipient = %recipient, error = %e, "reminder dispatch failed");
                }
            });
            targeted.push(member.respondent_id.clone());
        }

        info!(
            administrator_id = %cmd.administrator_id,
            reminders = targeted.len(),
            "reminders dispatched"
        );
        Ok(SendRemindersResult { targeted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryAssessmentStore, InMemoryRespondentDirectory};
    use crate::adapters::notification::RecordingNotificationDispatcher;
    use crate::domain::catalog::ItemCatalog;
    use crate::domain::foundation::{OrganizationName, RespondentProfile, Role, Timestamp};
    use crate::domain::submission::Submission;

    fn profile(id: &str, role: Role) -> RespondentProfile {
        RespondentProfile::new(
            RespondentId::new(id).unwrap(),
            None,
            OrganizationName::new("Acme").unwrap(),
            role,
        )
    }

    async fn setup(
        dispatcher: Arc<RecordingNotificationDispatcher>,
    ) -> SendRemindersHandler {
        let store = Arc::new(InMemoryAssessmentStore::new());
        let mut done = Submission::start(RespondentId::new("done@acme.com").unwrap());
        done.complete(Timestamp::now()).unwrap();
        store.insert_submission(done).await;
        store
            .insert_submission(Submission::start(RespondentId::new("busy@acme.com").unwrap()))
            .await;

        let directory = Arc::new(InMemoryRespondentDirectory::with_profiles(vec![
            profile("boss@acme.com", Role::Administrator),
            profile("done@acme.com", Role::Member),
            profile("busy@acme.com", Role::Member),
            profile("idle@acme.com", Role::Member),
        ]));
        let team_status = Arc::new(GetTeamStatusHandler::new(
            Arc::new(ItemCatalog::embedded().unwrap()),
            directory,
            store.clone(),
            store,
        ));
        SendRemindersHandler::new(team_status, dispatcher)
    }

    fn cmd() -> SendRemindersCommand {
        SendRemindersCommand {
            administrator_id: RespondentId::new("boss@acme.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn reminds_everyone_not_completed() {
        let dispatcher = Arc::new(RecordingNotificationDispatcher::new());
        let handler = setup(dispatcher.clone()).await;

        let result = handler.handle(cmd()).await.unwrap();
        dispatcher.wait_for_attempts(2).await;

        let targeted: Vec<_> = result.targeted.iter().map(RespondentId::as_str).collect();
        assert_eq!(targeted, vec!["busy@acme.com", "idle@acme.com"]);
        let mut recipients: Vec<_> = dispatcher
            .sent()
            .await
            .into_iter()
            .map(|n| n.recipient.to_string())
            .collect();
        recipients.sort();
        assert_eq!(recipients, vec!["busy@acme.com", "idle@acme.com"]);
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_fail_request() {
        let dispatcher = Arc::new(RecordingNotificationDispatcher::new());
        dispatcher
            .fail_for(RespondentId::new("busy@acme.com").unwrap())
            .await;
        let handler = setup(dispatcher.clone()).await;

        let result = handler.handle(cmd()).await.unwrap();
        dispatcher.wait_for_attempts(2).await;

        assert_eq!(result.targeted.len(), 2);
        assert_eq!(dispatcher.sent().await.len(), 1);
    }
}
