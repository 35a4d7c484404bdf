//! HTTP adapters - REST API over axum.
//!
//! - `assessment` - respondent-facing submission flow
//! - `reporting` - administrator rollups, team status and reminders
//! - `middleware` - identity resolution and role extractors

pub mod assessment;
pub mod error;
pub mod middleware;
pub mod reporting;
pub mod router;
pub mod state;

pub use error::ErrorResponse;
pub use router::{app_router, with_http_layers};
pub use state::AppState;
