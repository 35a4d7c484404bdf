//! Domain completion tracker handlers.

mod get_completed_domains;
mod mark_domain_complete;

pub use get_completed_domains::{GetCompletedDomainsHandler, GetCompletedDomainsQuery};
pub use mark_domain_complete::{MarkDomainCompleteCommand, MarkDomainCompleteHandler};
