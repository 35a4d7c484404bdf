//! Scoring and rollup handlers.

mod compute_submission_scores;
mod get_organization_rollup;

pub use compute_submission_scores::{ComputeSubmissionScoresHandler, ComputeSubmissionScoresQuery};
pub use get_organization_rollup::{GetOrganizationRollupHandler, GetOrganizationRollupQuery};
