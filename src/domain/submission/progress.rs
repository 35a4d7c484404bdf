//! Progress snapshots and latest-status classification.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainId, SubmissionId, SubmissionStatus, Timestamp};
use crate::domain::scoring::ResponseSet;

use super::Submission;

/// Number of catalog domains present in `completed`.
///
/// Flags for domains no longer in the catalog are ignored.
pub fn domains_done(catalog: &ItemCatalog, completed: &BTreeSet<DomainId>) -> usize {
    catalog
        .domains()
        .iter()
        .filter(|d| completed.contains(&d.id))
        .count()
}

/// True only when every catalog domain is marked done.
pub fn all_domains_done(catalog: &ItemCatalog, completed: &BTreeSet<DomainId>) -> bool {
    domains_done(catalog, completed) == catalog.domain_count()
}

/// Answered/total counts and the completion flag of one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainProgress {
    pub domain_id: DomainId,
    pub title: String,
    pub answered: usize,
    pub total: usize,
    pub done: bool,
}

/// A snapshot of one submission's progress across all domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionProgress {
    pub submission_id: SubmissionId,
    pub status: SubmissionStatus,
    pub domains: Vec<DomainProgress>,
    pub domains_done: usize,
    pub total_domains: usize,
}

impl SubmissionProgress {
    /// Builds the snapshot from stored responses and completion flags.
    pub fn build(
        catalog: &ItemCatalog,
        submission: &Submission,
        responses: &ResponseSet,
        completed: &BTreeSet<DomainId>,
    ) -> Self {
        let domains = catalog
            .domains()
            .iter()
            .map(|d| DomainProgress {
                domain_id: d.id.clone(),
                title: d.title.clone(),
                answered: responses.answered_in(d),
                total: d.item_count(),
                done: completed.contains(&d.id),
            })
            .collect();

        Self {
            submission_id: *submission.id(),
            status: submission.status(),
            domains,
            domains_done: domains_done(catalog, completed),
            total_domains: catalog.domain_count(),
        }
    }

    /// True when every domain is marked done.
    pub fn is_complete(&self) -> bool {
        self.domains.iter().all(|d| d.done)
    }

    /// First domain, in catalog order, not yet marked done.
    pub fn first_incomplete(&self) -> Option<&DomainId> {
        self.domains.iter().find(|d| !d.done).map(|d| &d.domain_id)
    }

    /// Share of items answered, 0-100.
    pub fn percent_answered(&self) -> u8 {
        let total: usize = self.domains.iter().map(|d| d.total).sum();
        if total == 0 {
            return 0;
        }
        let answered: usize = self.domains.iter().map(|d| d.answered).sum();
        ((answered * 100) / total) as u8
    }
}

/// Classification of a respondent's most recent submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LatestSubmissionStatus {
    NotStarted,
    InProgress {
        submission_id: SubmissionId,
        domains_done: usize,
        total_domains: usize,
    },
    Completed {
        submission_id: SubmissionId,
        completed_at: Option<Timestamp>,
    },
}

impl LatestSubmissionStatus {
    /// Classifies the latest submission (if any) with its completion flags.
    pub fn classify(
        catalog: &ItemCatalog,
        latest: Option<&Submission>,
        completed: &BTreeSet<DomainId>,
    ) -> Self {
        match latest {
            None => LatestSubmissionStatus::NotStarted,
            Some(s) if s.is_completed() => LatestSubmissionStatus::Completed {
                submission_id: *s.id(),
                completed_at: s.completed_at().copied(),
            },
            Some(s) => LatestSubmissionStatus::InProgress {
                submission_id: *s.id(),
                domains_done: domains_done(catalog, completed),
                total_domains: catalog.domain_count(),
            },
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, LatestSubmissionStatus::Completed { .. })
    }

    /// Short label for display, e.g. "In progress (2/4)".
    pub fn label(&self) -> String {
        match self {
            LatestSubmissionStatus::NotStarted => "Not started".to_string(),
            LatestSubmissionStatus::InProgress {
                domains_done,
                total_domains,
                ..
            } => format!("In progress ({}/{})", domains_done, total_domains),
            LatestSubmissionStatus::Completed { .. } => "Completed".to_string(),
        }
    }
}
