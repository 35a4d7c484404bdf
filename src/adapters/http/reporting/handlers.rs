//! HTTP handlers for administrator reporting endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::handle_reporting_error;
use crate::adapters::http::middleware::RequireAdministrator;
use crate::adapters::http::state::AppState;
use crate::application::handlers::scoring::GetOrganizationRollupQuery;
use crate::application::handlers::team::{GetTeamStatusQuery, SendRemindersCommand};

use super::dto::RemindersResponse;

/// GET /api/reports/rollup - Mean scores of the caller's organization
pub async fn get_rollup(
    State(state): State<AppState>,
    RequireAdministrator(admin): RequireAdministrator,
) -> Response {
    let query = GetOrganizationRollupQuery {
        organization: admin.organization,
    };

    match state.rollup_handler().handle(query).await {
        Ok(rollup) => (StatusCode::OK, Json(rollup)).into_response(),
        Err(e) => handle_reporting_error(e),
    }
}

/// GET /api/reports/team - Completion status of the caller's team
pub async fn get_team_status(
    State(state): State<AppState>,
    RequireAdministrator(admin): RequireAdministrator,
) -> Response {
    let query = GetTeamStatusQuery {
        administrator_id: admin.id,
    };

    match state.team_status_handler().handle(query).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => handle_reporting_error(e),
    }
}

/// POST /api/reports/team/reminders - Nudge members who have not completed
pub async fn send_reminders(
    State(state): State<AppState>,
    RequireAdministrator(admin): RequireAdministrator,
) -> Response {
    let cmd = SendRemindersCommand {
        administrator_id: admin.id,
    };

    match state.send_reminders_handler().handle(cmd).await {
        Ok(result) => (StatusCode::ACCEPTED, Json(RemindersResponse::from(result))).into_response(),
        Err(e) => handle_reporting_error(e),
    }
}
