//! Shared application state for the HTTP adapters.

use std::sync::Arc;

use crate::application::handlers::assessment::{
    CompleteDomainHandler, GetProgressHandler, ResumeAssessmentHandler, SubmitDomainHandler,
};
use crate::application::handlers::scoring::{
    ComputeSubmissionScoresHandler, GetOrganizationRollupHandler,
};
use crate::application::handlers::submission::GetLatestStatusHandler;
use crate::application::handlers::team::{GetTeamStatusHandler, SendRemindersHandler};
use crate::domain::catalog::ItemCatalog;
use crate::ports::{
    DomainCompletionStore, NotificationDispatcher, RespondentDirectory, ResponseStore,
    SubmissionRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every field is Arc-wrapped. Handlers are built
/// on demand from the shared ports.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ItemCatalog>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub responses: Arc<dyn ResponseStore>,
    pub completions: Arc<dyn DomainCompletionStore>,
    pub directory: Arc<dyn RespondentDirectory>,
    pub dispatcher: Arc<dyn NotificationDispatcher>,
}

impl AppState {
    pub fn resume_handler(&self) -> ResumeAssessmentHandler {
        ResumeAssessmentHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.responses.clone(),
            self.completions.clone(),
        )
    }

    pub fn progress_handler(&self) -> GetProgressHandler {
        GetProgressHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.responses.clone(),
            self.completions.clone(),
        )
    }

    pub fn submit_domain_handler(&self) -> SubmitDomainHandler {
        SubmitDomainHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.responses.clone(),
            self.completions.clone(),
        )
    }

    pub fn complete_domain_handler(&self) -> CompleteDomainHandler {
        CompleteDomainHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.responses.clone(),
            self.completions.clone(),
        )
    }

    pub fn latest_status_handler(&self) -> GetLatestStatusHandler {
        GetLatestStatusHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.completions.clone(),
        )
    }

    pub fn scores_handler(&self) -> ComputeSubmissionScoresHandler {
        ComputeSubmissionScoresHandler::new(
            self.catalog.clone(),
            self.submissions.clone(),
            self.responses.clone(),
            self.directory.clone(),
        )
    }

    pub fn rollup_handler(&self) -> GetOrganizationRollupHandler {
        GetOrganizationRollupHandler::new(
            self.catalog.clone(),
            self.directory.clone(),
            self.submissions.clone(),
            self.responses.clone(),
        )
    }

    pub fn team_status_handler(&self) -> GetTeamStatusHandler {
        GetTeamStatusHandler::new(
            self.catalog.clone(),
            self.directory.clone(),
            self.submissions.clone(),
            self.completions.clone(),
        )
    }

    pub fn send_reminders_handler(&self) -> SendRemindersHandler {
        SendRemindersHandler::new(Arc::new(self.team_status_handler()), self.dispatcher.clone())
    }
}
