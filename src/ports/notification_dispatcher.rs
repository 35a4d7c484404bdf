//! Notification dispatch port.
//!
//! Delivery mechanics live outside this core. Callers never wait on or fail
//! because of a dispatch.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, RespondentId};
use async_trait::async_trait;

/// A message addressed to one respondent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: RespondentId,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Attempts delivery.
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError>;
}
