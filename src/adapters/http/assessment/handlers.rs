//! HTTP handlers for assessment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{error_response, handle_assessment_error, ErrorResponse};
use crate::adapters::http::middleware::RequireRespondent;
use crate::adapters::http::state::AppState;
use crate::application::handlers::assessment::{
    CompleteDomainCommand, GetProgressQuery, ResumeAssessmentCommand, SubmitDomainCommand,
};
use crate::application::handlers::scoring::ComputeSubmissionScoresQuery;
use crate::application::handlers::submission::GetLatestStatusQuery;
use crate::domain::foundation::{DomainId, SubmissionId};

use super::dto::{LatestStatusResponse, SubmitDomainRequest};

fn parse_submission_id(raw: &str) -> Result<SubmissionId, Response> {
    raw.parse::<SubmissionId>().map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request("Invalid submission ID"),
        )
    })
}

fn parse_domain_id(raw: String) -> Result<DomainId, Response> {
    DomainId::new(raw).map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, ErrorResponse::bad_request(e.to_string()))
    })
}

/// POST /api/assessment/resume - Start or resume the caller's submission
pub async fn resume_assessment(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
) -> Response {
    let cmd = ResumeAssessmentCommand {
        respondent_id: respondent.id,
    };

    match state.resume_handler().handle(cmd).await {
        Ok(context) => {
            let status = if context.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            (status, Json(context)).into_response()
        }
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/submissions/:id/progress
pub async fn get_progress(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
    Path(submission_id): Path<String>,
) -> Response {
    let submission_id = match parse_submission_id(&submission_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetProgressQuery {
        respondent_id: respondent.id,
        submission_id,
    };

    match state.progress_handler().handle(query).await {
        Ok(progress) => (StatusCode::OK, Json(progress)).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// PUT /api/assessment/submissions/:id/domains/:domain - Save a domain's answers
pub async fn submit_domain(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
    Path((submission_id, domain_id)): Path<(String, String)>,
    Json(req): Json<SubmitDomainRequest>,
) -> Response {
    let submission_id = match parse_submission_id(&submission_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let domain_id = match parse_domain_id(domain_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let answers = match req.into_answers() {
        Ok(answers) => answers,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, ErrorResponse::bad_request(e.to_string()))
        }
    };

    let cmd = SubmitDomainCommand {
        respondent_id: respondent.id,
        submission_id,
        domain_id,
        answers,
    };

    match state.submit_domain_handler().handle(cmd).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// POST /api/assessment/submissions/:id/domains/:domain/complete
pub async fn complete_domain(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
    Path((submission_id, domain_id)): Path<(String, String)>,
) -> Response {
    let submission_id = match parse_submission_id(&submission_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let domain_id = match parse_domain_id(domain_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CompleteDomainCommand {
        respondent_id: respondent.id,
        submission_id,
        domain_id,
    };

    match state.complete_domain_handler().handle(cmd).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/status - Caller's latest submission status
pub async fn get_latest_status(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
) -> Response {
    let query = GetLatestStatusQuery {
        respondent_id: respondent.id,
    };

    match state.latest_status_handler().handle(query).await {
        Ok(status) => (StatusCode::OK, Json(LatestStatusResponse::from(status))).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}

/// GET /api/assessment/submissions/:id/scores - Scorecard of one submission
pub async fn get_submission_scores(
    State(state): State<AppState>,
    RequireRespondent(respondent): RequireRespondent,
    Path(submission_id): Path<String>,
) -> Response {
    let submission_id = match parse_submission_id(&submission_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ComputeSubmissionScoresQuery {
        requester: respondent,
        submission_id,
    };

    match state.scores_handler().handle(query).await {
        Ok(scorecard) => (StatusCode::OK, Json(scorecard)).into_response(),
        Err(e) => handle_assessment_error(e),
    }
}
