//! In-memory adapters for tests and local development.

mod assessment_store;
mod respondent_directory;

pub use assessment_store::InMemoryAssessmentStore;
pub use respondent_directory::InMemoryRespondentDirectory;
