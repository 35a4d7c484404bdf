//! Response store handlers.

mod load_responses;
mod save_domain_responses;

pub use load_responses::{LoadResponsesHandler, LoadResponsesQuery, LoadResponsesResult};
pub use save_domain_responses::{
    SaveDomainResponsesCommand, SaveDomainResponsesHandler, SaveDomainResponsesResult,
};
