//! HTTP DTOs for reporting endpoints.

use serde::Serialize;

use crate::application::handlers::team::SendRemindersResult;

/// Members a reminder was dispatched to.
#[derive(Debug, Clone, Serialize)]
pub struct RemindersResponse {
    pub targeted: Vec<String>,
    pub count: usize,
}

impl From<SendRemindersResult> for RemindersResponse {
    fn from(result: SendRemindersResult) -> Self {
        let targeted: Vec<String> = result.targeted.iter().map(ToString::to_string).collect();
        Self {
            count: targeted.len(),
            targeted,
        }
    }
}
