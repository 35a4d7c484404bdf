//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresSubmissionRepository` - Submission lifecycle with per-respondent advisory locking
//! - `PostgresResponseStore` - Transactional response upserts
//! - `PostgresDomainCompletionStore` - Monotonic domain completion flags
//! - `PostgresRespondentDirectory` - Read-only respondent and membership lookup

mod domain_completion_store;
mod respondent_directory;
mod response_store;
mod submission_repository;

pub use domain_completion_store::PostgresDomainCompletionStore;
pub use respondent_directory::PostgresRespondentDirectory;
pub use response_store::PostgresResponseStore;
pub use submission_repository::PostgresSubmissionRepository;
