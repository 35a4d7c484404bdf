//! Application router assembly.

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{Environment, ServerConfig};

use super::assessment::assessment_routes;
use super::middleware::{identity_middleware, RESPONDENT_HEADER};
use super::reporting::reporting_routes;
use super::state::AppState;

/// Builds the API router.
///
/// Every `/api` route passes through identity resolution; `/health` does not.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/assessment", assessment_routes())
        .nest("/reports", reporting_routes())
        .layer(middleware::from_fn_with_state(
            state.directory.clone(),
            identity_middleware,
        ));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(state)
}

/// Wraps a router with tracing, the request timeout, and CORS.
pub fn with_http_layers(router: Router, config: &ServerConfig) -> Router {
    router
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(RESPONDENT_HEADER)])
}

/// GET /health - Liveness probe
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
