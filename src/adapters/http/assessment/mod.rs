//! HTTP adapter for respondent-facing assessment endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{LatestStatusResponse, SubmitDomainRequest};
pub use routes::assessment_routes;
