//! Submission lifecycle handlers.

mod complete_submission;
mod get_latest_status;
mod get_or_create_submission;

pub use complete_submission::{
    CompleteSubmissionCommand, CompleteSubmissionHandler, CompleteSubmissionResult,
};
pub use get_latest_status::{GetLatestStatusHandler, GetLatestStatusQuery};
pub use get_or_create_submission::{
    GetOrCreateSubmissionCommand, GetOrCreateSubmissionHandler, GetOrCreateSubmissionResult,
};
