//! Identity middleware and extractors for axum.
//!
//! The upstream identity gateway authenticates the caller and forwards the
//! respondent identifier in the `X-Respondent-Id` header. This module
//! resolves that identifier through the `RespondentDirectory` port:
//!
//! ```text
//! Request → identity_middleware → injects RespondentProfile into extensions
//!                                          ↓
//!              Handler → RequireRespondent / RequireAdministrator read it
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::{error_response, ErrorResponse};
use crate::domain::foundation::{RespondentId, RespondentProfile};
use crate::ports::RespondentDirectory;

/// Header carrying the authenticated respondent identifier.
pub const RESPONDENT_HEADER: &str = "x-respondent-id";

/// Identity middleware state - wraps the respondent directory.
pub type IdentityState = Arc<dyn RespondentDirectory>;

/// Resolves the respondent header into a `RespondentProfile`.
///
/// A missing header passes through untouched so that unauthenticated routes
/// keep working; extractors enforce presence. A header naming an unknown
/// respondent is rejected with 401, and a directory failure with 503.
pub async fn identity_middleware(
    State(directory): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(RESPONDENT_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);

    let Some(raw) = header else {
        return next.run(request).await;
    };

    let respondent_id = match RespondentId::new(raw) {
        Ok(id) => id,
        Err(_) => return IdentityRejection::Unauthenticated.into_response(),
    };

    match directory.lookup(&respondent_id).await {
        Ok(Some(profile)) => {
            request.extensions_mut().insert(profile);
            next.run(request).await
        }
        Ok(None) => {
            tracing::debug!(respondent_id = %respondent_id, "unknown respondent header");
            IdentityRejection::Unauthenticated.into_response()
        }
        Err(e) => {
            tracing::error!(respondent_id = %respondent_id, error = %e, "identity lookup failed");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::unavailable("Identity lookup unavailable"),
            )
        }
    }
}

/// Extractor that requires a resolved respondent.
#[derive(Debug, Clone)]
pub struct RequireRespondent(pub RespondentProfile);

#[async_trait]
impl<S> FromRequestParts<S> for RequireRespondent
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RespondentProfile>()
            .cloned()
            .map(RequireRespondent)
            .ok_or(IdentityRejection::Unauthenticated)
    }
}

/// Extractor that requires a resolved administrator.
#[derive(Debug, Clone)]
pub struct RequireAdministrator(pub RespondentProfile);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdministrator
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireRespondent(profile) = RequireRespondent::from_request_parts(parts, state).await?;
        if profile.is_administrator() {
            Ok(RequireAdministrator(profile))
        } else {
            Err(IdentityRejection::NotAdministrator)
        }
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityRejection {
    /// No resolvable respondent identifier was provided.
    Unauthenticated,
    /// The respondent is known but lacks the administrator role.
    NotAdministrator,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        match self {
            IdentityRejection::Unauthenticated => error_response(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthenticated("Authentication required"),
            ),
            IdentityRejection::NotAdministrator => error_response(
                StatusCode::FORBIDDEN,
                ErrorResponse::forbidden("Administrator role required"),
            ),
        }
    }
}
