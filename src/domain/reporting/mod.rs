//! Reporting module - organization rollups and team status.

mod errors;
mod rollup;
mod team_status;

pub use errors::ReportingError;
pub use rollup::{latest_per_respondent, DegradedScope, OrganizationRollup, RollupBuilder};
pub use team_status::{MemberStatus, TeamStatusReport};
