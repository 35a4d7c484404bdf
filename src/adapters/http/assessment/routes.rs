//! HTTP routes for assessment endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    complete_domain, get_latest_status, get_progress, get_submission_scores, resume_assessment,
    submit_domain,
};

/// Respondent-facing routes, mounted at `/api/assessment`.
///
/// - `POST /resume`
/// - `GET  /status`
/// - `GET  /submissions/:id/progress`
/// - `GET  /submissions/:id/scores`
/// - `PUT  /submissions/:id/domains/:domain`
/// - `POST /submissions/:id/domains/:domain/complete`
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route("/resume", post(resume_assessment))
        .route("/status", get(get_latest_status))
        .route("/submissions/:id/progress", get(get_progress))
        .route("/submissions/:id/scores", get(get_submission_scores))
        .route("/submissions/:id/domains/:domain", put(submit_domain))
        .route(
            "/submissions/:id/domains/:domain/complete",
            post(complete_domain),
        )
}
