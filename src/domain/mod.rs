//! Domain layer containing assessment types and rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `catalog` - Static item catalog with load-time integrity checks
//! - `submission` - Submission lifecycle, progress, and client-held context
//! - `scoring` - Response normalization and per-submission aggregation
//! - `reporting` - Organization rollup and team status

pub mod catalog;
pub mod foundation;
pub mod reporting;
pub mod scoring;
pub mod submission;
