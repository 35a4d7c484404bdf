//! Integration tests for the HTTP surface.
//!
//! Requests go through the full router (identity middleware, extractors,
//! handlers, error mapping) backed by the in-memory adapters.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use org_assessment::adapters::http::{app_router, AppState};
use org_assessment::adapters::memory::{InMemoryAssessmentStore, InMemoryRespondentDirectory};
use org_assessment::adapters::notification::RecordingNotificationDispatcher;
use org_assessment::domain::catalog::ItemCatalog;
use org_assessment::domain::foundation::{OrganizationName, RespondentId, RespondentProfile, Role};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn profile(name: &str, organization: &str, role: Role) -> RespondentProfile {
    RespondentProfile::new(
        RespondentId::new(format!("{}@example.com", name)).unwrap(),
        Some(name.to_string()),
        OrganizationName::new(organization).unwrap(),
        role,
    )
}

fn app() -> Router {
    let store = Arc::new(InMemoryAssessmentStore::new());
    let directory = Arc::new(InMemoryRespondentDirectory::with_profiles([
        profile("boss", "Acme", Role::Administrator),
        profile("ada", "Acme", Role::Member),
        profile("bo", "Acme", Role::Member),
        profile("eve", "Globex", Role::Member),
    ]));

    app_router(AppState {
        catalog: Arc::new(ItemCatalog::embedded().unwrap()),
        submissions: store.clone(),
        responses: store.clone(),
        completions: store,
        directory,
        dispatcher: Arc::new(RecordingNotificationDispatcher::new()),
    })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    caller: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(caller) = caller {
        builder = builder.header("x-respondent-id", format!("{}@example.com", caller));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn resume(app: &Router, caller: &str) -> String {
    let (status, body) = send(app, Method::POST, "/api/assessment/resume", Some(caller), None).await;
    assert!(status.is_success(), "resume failed: {} {}", status, body);
    body["submission_id"].as_str().unwrap().to_string()
}

fn domain_answers(prefix: &str, count: u8, raw: i64) -> Value {
    let answers: serde_json::Map<String, Value> = (1..=count)
        .map(|n| (format!("{}{:02}", prefix, n), json!(raw)))
        .collect();
    json!({ "answers": answers })
}

// =============================================================================
// Identity
// =============================================================================

#[tokio::test]
async fn health_needs_no_identity() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_or_unknown_identity_is_401() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/assessment/resume", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");

    let (status, _) = send(&app, Method::POST, "/api/assessment/resume", Some("ghost"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn members_cannot_read_reports() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/reports/team", Some("ada"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

// =============================================================================
// Assessment flow
// =============================================================================

#[tokio::test]
async fn resume_creates_then_reuses_submission() {
    let app = app();
    let (status, first) = send(&app, Method::POST, "/api/assessment/resume", Some("ada"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["created"], true);
    assert_eq!(first["current_domain"], "alignment");
    assert_eq!(first["answers"]["AL01"]["state"], "unanswered");

    let (status, second) = send(&app, Method::POST, "/api/assessment/resume", Some("ada"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["submission_id"], first["submission_id"]);
}

#[tokio::test]
async fn partial_domain_save_reports_progress() {
    let app = app();
    let id = resume(&app, "ada").await;

    let uri = format!("/api/assessment/submissions/{}/domains/alignment", id);
    let (status, outcome) = send(&app, Method::PUT, &uri, Some("ada"), Some(domain_answers("AL", 6, 5))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["saved"], 6);
    assert_eq!(outcome["domain_done"], false);

    let uri = format!("/api/assessment/submissions/{}/progress", id);
    let (status, progress) = send(&app, Method::GET, &uri, Some("ada"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(progress["domains"][0]["answered"], 6);
    assert_eq!(progress["domains"][0]["total"], 10);
    assert_eq!(progress["domains_done"], 0);
}

#[tokio::test]
async fn explicit_completion_with_gaps_is_400_with_missing_items() {
    let app = app();
    let id = resume(&app, "ada").await;
    let uri = format!("/api/assessment/submissions/{}/domains/execution", id);
    send(&app, Method::PUT, &uri, Some("ada"), Some(domain_answers("EX", 9, 4))).await;

    let uri = format!("/api/assessment/submissions/{}/domains/execution/complete", id);
    let (status, body) = send(&app, Method::POST, &uri, Some("ada"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["missing_items"], "EX10");
}

#[tokio::test]
async fn out_of_range_score_is_400() {
    let app = app();
    let id = resume(&app, "ada").await;
    let uri = format!("/api/assessment/submissions/{}/domains/alignment", id);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some("ada"),
        Some(json!({ "answers": { "AL01": 9 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn malformed_and_unknown_submission_ids() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/assessment/submissions/not-a-uuid/progress",
        Some("ada"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!(
        "/api/assessment/submissions/{}/progress",
        "00000000-0000-4000-8000-000000000000"
    );
    let (status, body) = send(&app, Method::GET, &uri, Some("ada"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SUBMISSION_NOT_FOUND");
}

#[tokio::test]
async fn writing_to_someone_elses_submission_is_403() {
    let app = app();
    let id = resume(&app, "ada").await;
    let uri = format!("/api/assessment/submissions/{}/domains/alignment", id);
    let (status, _) = send(&app, Method::PUT, &uri, Some("bo"), Some(domain_answers("AL", 2, 3))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn full_flow_completes_and_scores() {
    let app = app();
    let id = resume(&app, "ada").await;

    let mut last = Value::Null;
    for (domain, prefix) in [
        ("alignment", "AL"),
        ("execution", "EX"),
        ("collaboration", "CO"),
        ("adaptability", "AD"),
    ] {
        let uri = format!("/api/assessment/submissions/{}/domains/{}", id, domain);
        let (status, outcome) =
            send(&app, Method::PUT, &uri, Some("ada"), Some(domain_answers(prefix, 10, 4))).await;
        assert_eq!(status, StatusCode::OK);
        last = outcome;
    }
    assert_eq!(last["submission_completed"], true);

    let (status, body) = send(&app, Method::GET, "/api/assessment/status", Some("ada"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "completed");
    assert_eq!(body["label"], "Completed");

    let uri = format!("/api/assessment/submissions/{}/scores", id);
    let (status, scores) = send(&app, Method::GET, &uri, Some("ada"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(scores["domains"]["alignment"], 50.0);
    assert_eq!(scores["sub_indices"]["innovation"], 50.0);

    // Same-organization administrator may read; other organizations may not.
    let (status, _) = send(&app, Method::GET, &uri, Some("boss"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &uri, Some("eve"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/api/assessment/submissions/{}/domains/alignment", id);
    let (status, body) =
        send(&app, Method::PUT, &uri, Some("ada"), Some(domain_answers("AL", 1, 7))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn administrator_reports() {
    let app = app();
    let id = resume(&app, "ada").await;
    let uri = format!("/api/assessment/submissions/{}/domains/alignment", id);
    send(&app, Method::PUT, &uri, Some("ada"), Some(domain_answers("AL", 10, 7))).await;

    let (status, rollup) = send(&app, Method::GET, "/api/reports/rollup", Some("boss"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rollup["respondent_count"], 1);
    assert_eq!(rollup["domains"]["alignment"], 100.0);
    assert_eq!(rollup["domains"]["execution"], Value::Null);

    let (status, team) = send(&app, Method::GET, "/api/reports/team", Some("boss"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["total_members"], 2);
    assert_eq!(team["completed_count"], 0);
    assert_eq!(team["all_completed"], false);

    let (status, reminders) = send(
        &app,
        Method::POST,
        "/api/reports/team/reminders",
        Some("boss"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(reminders["count"], 2);
}
