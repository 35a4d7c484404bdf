//! Submission aggregate entity.
//!
//! A submission is one respondent's attempt at the full assessment. It is
//! created in progress, moves to completed once every catalog domain has
//! been marked done, and is never deleted.

use std::cmp::Ordering;

use crate::domain::foundation::{
    DomainError, ErrorCode, RespondentId, StateMachine, SubmissionId, SubmissionStatus, Timestamp,
};
use serde::{Deserialize, Serialize};

/// Submission aggregate.
///
/// # Invariants
///
/// - `completed_at` is set if and only if `status` is `Completed`
/// - `Completed` is terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    id: SubmissionId,
    respondent_id: RespondentId,
    status: SubmissionStatus,
    started_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Submission {
    /// Starts a new in-progress submission now.
    pub fn start(respondent_id: RespondentId) -> Self {
        Self::start_at(respondent_id, Timestamp::now())
    }

    /// Starts a new in-progress submission at a given instant.
    pub fn start_at(respondent_id: RespondentId, started_at: Timestamp) -> Self {
        Self {
            id: SubmissionId::new(),
            respondent_id,
            status: SubmissionStatus::InProgress,
            started_at,
            completed_at: None,
        }
    }

    /// Reconstitute a submission from persistence (no validation).
    pub fn reconstitute(
        id: SubmissionId,
        respondent_id: RespondentId,
        status: SubmissionStatus,
        started_at: Timestamp,
        completed_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            respondent_id,
            status,
            started_at,
            completed_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn respondent_id(&self) -> &RespondentId {
        &self.respondent_id
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.status == SubmissionStatus::Completed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ordering
    // ─────────────────────────────────────────────────────────────────────────

    /// Orders submissions by recency: start time, ties broken by id.
    ///
    /// "Latest" everywhere in this crate means the maximum under this order.
    pub fn recency_cmp(&self, other: &Submission) -> Ordering {
        self.started_at
            .cmp(&other.started_at)
            .then_with(|| self.id.cmp(&other.id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given respondent owns this submission.
    pub fn is_owner(&self, respondent_id: &RespondentId) -> bool {
        &self.respondent_id == respondent_id
    }

    /// Validates that the respondent can write to this submission.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the respondent is not the owner
    pub fn authorize(&self, respondent_id: &RespondentId) -> Result<(), DomainError> {
        if self.is_owner(respondent_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Respondent is not authorized to access this submission",
            )
            .with_detail("submission_id", self.id.to_string()))
        }
    }

    /// Validates that responses may still be written.
    ///
    /// # Errors
    ///
    /// - `SubmissionCompleted` once the submission is completed
    pub fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SubmissionCompleted,
                "Cannot modify a completed submission",
            )
            .with_detail("submission_id", self.id.to_string()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Completes the submission.
    ///
    /// Returns `false` when it was already completed, leaving the original
    /// completion timestamp untouched.
    pub fn complete(&mut self, at: Timestamp) -> Result<bool, DomainError> {
        if self.is_completed() {
            return Ok(false);
        }
        self.status = self
            .status
            .transition_to(SubmissionStatus::Completed)
            .map_err(|e| DomainError::new(ErrorCode::InvalidStateTransition, e.to_string()))?;
        self.completed_at = Some(at);
        Ok(true)
    }
}
