//! Submission module - one respondent's attempt at the assessment.

mod aggregate;
mod context;
mod errors;
mod progress;

pub use aggregate::Submission;
pub use context::AssessmentContext;
pub use errors::AssessmentError;
pub use progress::{
    all_domains_done, domains_done, DomainProgress, LatestSubmissionStatus, SubmissionProgress,
};
