//! HTTP middleware for axum.
//!
//! - `identity` - Respondent resolution and role extractors

pub mod identity;

pub use identity::{
    identity_middleware, IdentityRejection, IdentityState, RequireAdministrator,
    RequireRespondent, RESPONDENT_HEADER,
};
