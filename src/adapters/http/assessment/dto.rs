//! HTTP DTOs for assessment endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, ValidationError};
use crate::domain::submission::LatestSubmissionStatus;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Answers for one domain, keyed by item id.
///
/// `null` marks an item the respondent left blank.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDomainRequest {
    pub answers: BTreeMap<String, Option<i64>>,
}

impl SubmitDomainRequest {
    /// Converts the raw keys into item ids.
    pub fn into_answers(self) -> Result<BTreeMap<ItemId, Option<i64>>, ValidationError> {
        self.answers
            .into_iter()
            .map(|(item, raw)| Ok((ItemId::new(item)?, raw)))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Caller's latest submission with a display label.
#[derive(Debug, Clone, Serialize)]
pub struct LatestStatusResponse {
    pub label: String,
    #[serde(flatten)]
    pub status: LatestSubmissionStatus,
}

impl From<LatestSubmissionStatus> for LatestStatusResponse {
    fn from(status: LatestSubmissionStatus) -> Self {
        Self {
            label: status.label(),
            status,
        }
    }
}
