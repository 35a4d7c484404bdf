//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `SubmissionRepository` - Submission lifecycle persistence
//! - `ResponseStore` - Idempotent per-item response upserts
//! - `DomainCompletionStore` - Monotonic per-domain completion flags
//!
//! ## Collaborator Ports
//!
//! - `RespondentDirectory` - Identity, role, and membership lookup
//! - `NotificationDispatcher` - Fire-and-forget reminder delivery

mod domain_completion_store;
mod notification_dispatcher;
mod respondent_directory;
mod response_store;
mod submission_repository;

pub use domain_completion_store::DomainCompletionStore;
pub use notification_dispatcher::{Notification, NotificationDispatcher};
pub use respondent_directory::RespondentDirectory;
pub use response_store::ResponseStore;
pub use submission_repository::SubmissionRepository;
