//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) and query handlers (read) are kept separate.

pub mod handlers;

pub use handlers::assessment::{
    CompleteDomainCommand, CompleteDomainHandler, DomainOutcome, GetProgressHandler,
    GetProgressQuery, ResumeAssessmentCommand, ResumeAssessmentHandler, SubmitDomainCommand,
    SubmitDomainHandler,
};
pub use handlers::scoring::{
    ComputeSubmissionScoresHandler, ComputeSubmissionScoresQuery, GetOrganizationRollupHandler,
    GetOrganizationRollupQuery,
};
pub use handlers::submission::{GetLatestStatusHandler, GetLatestStatusQuery};
pub use handlers::team::{
    GetTeamStatusHandler, GetTeamStatusQuery, SendRemindersCommand, SendRemindersHandler,
    SendRemindersResult,
};
