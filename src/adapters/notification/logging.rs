//! Notification dispatcher that only writes a log line.
//!
//! Stands in for the external delivery service in development.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{Notification, NotificationDispatcher};

#[derive(Debug, Clone, Default)]
pub struct LoggingNotificationDispatcher;

impl LoggingNotificationDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for LoggingNotificationDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "notification dispatched"
        );
        Ok(())
    }
}
