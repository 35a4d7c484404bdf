//! SubmissionStatus enum for tracking the lifecycle of an assessment attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a submission.
///
/// `InProgress` is the only initial state; `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    InProgress,
    Completed,
}

impl SubmissionStatus {
    /// Returns true if responses may still be written.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SubmissionStatus::InProgress)
    }

    /// Stable storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Completed => "completed",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(SubmissionStatus::InProgress),
            "completed" => Some(SubmissionStatus::Completed),
            _ => None,
        }
    }
}

impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionStatus::*;
        matches!((self, target), (InProgress, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SubmissionStatus::InProgress => vec![SubmissionStatus::Completed],
            SubmissionStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::InProgress => "In Progress",
            SubmissionStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
