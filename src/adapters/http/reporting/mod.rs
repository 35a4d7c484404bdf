//! HTTP adapter for administrator reporting endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::RemindersResponse;
pub use routes::reporting_routes;
