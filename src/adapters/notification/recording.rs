//! Notification dispatcher that records every message.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use crate::domain::foundation::{DomainError, ErrorCode, RespondentId};
use crate::ports::{Notification, NotificationDispatcher};

/// Captures notifications for assertions; selected recipients can be made
/// to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationDispatcher {
    sent: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<Mutex<HashSet<RespondentId>>>,
    attempts: Arc<Mutex<usize>>,
    notify: Arc<Notify>,
}

impl RecordingNotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes dispatches to `recipient` fail.
    pub async fn fail_for(&self, recipient: RespondentId) {
        self.failing.lock().await.insert(recipient);
    }

    /// Notifications delivered so far.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.lock().await.clone()
    }

    /// Waits until at least `count` dispatch attempts have finished.
    pub async fn wait_for_attempts(&self, count: usize) {
        loop {
            let notified = self.notify.notified();
            if *self.attempts.lock().await >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingNotificationDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DomainError> {
        let result = if self.failing.lock().await.contains(&notification.recipient) {
            Err(DomainError::new(ErrorCode::InternalError, "delivery refused")
                .with_detail("recipient", notification.recipient.as_str()))
        } else {
            self.sent.lock().await.push(notification);
            Ok(())
        };
        *self.attempts.lock().await += 1;
        self.notify.notify_waiters();
        result
    }
}
