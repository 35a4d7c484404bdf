//! Per-member status classification for an administrator's team.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::RespondentId;
use crate::domain::submission::LatestSubmissionStatus;

/// One team member and the state of their latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStatus {
    pub respondent_id: RespondentId,
    pub display_name: String,
    pub status: LatestSubmissionStatus,
}

impl MemberStatus {
    pub fn is_completed(&self) -> bool {
        self.status.is_completed()
    }
}

/// Team-wide summary used by the administrator view and reminder targeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatusReport {
    pub members: Vec<MemberStatus>,
    pub completed_count: usize,
    pub total_members: usize,
    /// False for an empty team.
    pub all_completed: bool,
}

impl TeamStatusReport {
    pub fn from_members(members: Vec<MemberStatus>) -> Self {
        let completed_count = members.iter().filter(|m| m.is_completed()).count();
        let total_members = members.len();
        Self {
            all_completed: total_members > 0 && completed_count == total_members,
            completed_count,
            total_members,
            members,
        }
    }

    /// Members who have not completed their latest submission.
    pub fn reminder_targets(&self) -> Vec<&MemberStatus> {
        self.members.iter().filter(|m| !m.is_completed()).collect()
    }
}
