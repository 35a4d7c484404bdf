//! HTTP routes for reporting endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{get_rollup, get_team_status, send_reminders};

/// Administrator routes, mounted at `/api/reports`.
pub fn reporting_routes() -> Router<AppState> {
    Router::new()
        .route("/rollup", get(get_rollup))
        .route("/team", get(get_team_status))
        .route("/team/reminders", post(send_reminders))
}
