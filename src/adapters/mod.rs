//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed stores and respondent directory
//! - `memory` - in-process stores for tests and local development
//! - `notification` - reminder dispatchers
//! - `http` - axum REST surface

pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;
