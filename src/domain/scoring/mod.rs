//! Scoring - stored responses, answer validation, and per-submission aggregation.

mod aggregation;
mod answers;
mod responses;

pub use aggregation::{domain_score, mean, sub_index_scores, Scorecard};
pub use answers::DomainAnswers;
pub use responses::{ItemAnswer, ResponseSet, StoredResponse};
