//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations over the
//! store and collaborator ports.

pub mod assessment;
pub mod completion;
pub mod responses;
pub mod scoring;
pub mod submission;
pub mod team;
