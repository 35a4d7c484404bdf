//! Assessment flow handlers used by the respondent-facing surface.

mod complete_domain;
mod get_progress;
mod resume_assessment;
mod submit_domain;

pub use complete_domain::{CompleteDomainCommand, CompleteDomainHandler};
pub use get_progress::{GetProgressHandler, GetProgressQuery};
pub use resume_assessment::{ResumeAssessmentCommand, ResumeAssessmentHandler};
pub use submit_domain::{DomainOutcome, SubmitDomainCommand, SubmitDomainHandler};
