//! In-memory respondent directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, OrganizationName, RespondentId, RespondentProfile};
use crate::ports::RespondentDirectory;

/// Directory backed by a map of profiles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRespondentDirectory {
    profiles: Arc<RwLock<BTreeMap<RespondentId, RespondentProfile>>>,
}

impl InMemoryRespondentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with profiles.
    pub fn with_profiles(profiles: impl IntoIterator<Item = RespondentProfile>) -> Self {
        let profiles = profiles.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }

    /// Adds or replaces a profile.
    pub async fn register(&self, profile: RespondentProfile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }
}

#[async_trait]
impl RespondentDirectory for InMemoryRespondentDirectory {
    async fn lookup(
        &self,
        respondent_id: &RespondentId,
    ) -> Result<Option<RespondentProfile>, DomainError> {
        Ok(self.profiles.read().await.get(respondent_id).cloned())
    }

    async fn team_of(
        &self,
        administrator_id: &RespondentId,
    ) -> Result<Vec<RespondentId>, DomainError> {
        let profiles = self.profiles.read().await;
        let Some(admin) = profiles.get(administrator_id) else {
            return Ok(Vec::new());
        };
        Ok(profiles
            .values()
            .filter(|p| p.organization == admin.organization && &p.id != administrator_id)
            .map(|p| p.id.clone())
            .collect())
    }

    async fn members_of(
        &self,
        organization: &OrganizationName,
    ) -> Result<Vec<RespondentId>, DomainError> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| &p.organization == organization)
            .map(|p| p.id.clone())
            .collect())
    }
}
