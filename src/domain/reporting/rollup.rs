//! Organization rollup over "latest submission per respondent".
//!
//! Each member contributes the unrounded scores of exactly one submission,
//! the latest under [`Submission::recency_cmp`], whatever its status. The
//! organization value for a domain or sub-index is the mean over the
//! contributing submissions that have data for it. Rounding happens once,
//! when the rollup is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{
    round2, DomainId, OrganizationName, RespondentId, SubIndexId, SubmissionId, Timestamp,
};
use crate::domain::scoring::{mean, ResponseSet, Scorecard};
use crate::domain::submission::Submission;

/// Reduces any number of submissions to the latest one per respondent.
pub fn latest_per_respondent(
    submissions: impl IntoIterator<Item = Submission>,
) -> BTreeMap<RespondentId, Submission> {
    let mut latest: BTreeMap<RespondentId, Submission> = BTreeMap::new();
    for submission in submissions {
        match latest.get(submission.respondent_id()) {
            Some(current) if current.recency_cmp(&submission).is_ge() => {}
            _ => {
                latest.insert(submission.respondent_id().clone(), submission);
            }
        }
    }
    latest
}

/// A part of the rollup that could not be read and reports no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum DegradedScope {
    /// Membership or submission selection failed; the whole rollup is empty.
    Organization { reason: String },
    /// Responses of one selected submission could not be loaded.
    Submission {
        submission_id: SubmissionId,
        respondent_id: RespondentId,
        reason: String,
    },
}

/// Organization-wide mean scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRollup {
    pub organization: OrganizationName,
    /// Members with at least one submission.
    pub respondent_count: usize,
    /// The selected submission of every counted member.
    pub submission_ids: Vec<SubmissionId>,
    pub domains: BTreeMap<DomainId, Option<f64>>,
    pub sub_indices: BTreeMap<SubIndexId, Option<f64>>,
    pub degraded: Vec<DegradedScope>,
    pub computed_at: Timestamp,
}

impl OrganizationRollup {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Accumulates per-submission scorecards into an [`OrganizationRollup`].
pub struct RollupBuilder<'a> {
    catalog: &'a ItemCatalog,
    organization: OrganizationName,
    submission_ids: Vec<SubmissionId>,
    domain_samples: BTreeMap<DomainId, Vec<f64>>,
    sub_index_samples: BTreeMap<SubIndexId, Vec<f64>>,
    degraded: Vec<DegradedScope>,
}

impl<'a> RollupBuilder<'a> {
    pub fn new(catalog: &'a ItemCatalog, organization: OrganizationName) -> Self {
        Self {
            catalog,
            organization,
            submission_ids: Vec::new(),
            domain_samples: BTreeMap::new(),
            sub_index_samples: BTreeMap::new(),
            degraded: Vec::new(),
        }
    }

    /// Adds one member's selected submission and its responses.
    pub fn add_submission(&mut self, submission: &Submission, responses: &ResponseSet) {
        let card = Scorecard::compute(self.catalog, *submission.id(), responses);
        for (domain, score) in card.domains {
            if let Some(score) = score {
                self.domain_samples.entry(domain).or_default().push(score);
            }
        }
        for (sub_index, score) in card.sub_indices {
            if let Some(score) = score {
                self.sub_index_samples.entry(sub_index).or_default().push(score);
            }
        }
        self.submission_ids.push(*submission.id());
    }

    /// Counts a selected submission whose responses could not be read.
    pub fn degrade_submission(&mut self, submission: &Submission, reason: impl Into<String>) {
        self.submission_ids.push(*submission.id());
        self.degraded.push(DegradedScope::Submission {
            submission_id: *submission.id(),
            respondent_id: submission.respondent_id().clone(),
            reason: reason.into(),
        });
    }

    /// Marks the whole organization scope as unreadable.
    pub fn degrade_organization(&mut self, reason: impl Into<String>) {
        self.degraded.push(DegradedScope::Organization {
            reason: reason.into(),
        });
    }

    pub fn build(self) -> OrganizationRollup {
        let domains = self
            .catalog
            .domains()
            .iter()
            .map(|d| (d.id.clone(), Self::rounded_mean(self.domain_samples.get(&d.id))))
            .collect();
        let sub_indices = self
            .catalog
            .sub_indices()
            .iter()
            .map(|s| (s.id.clone(), Self::rounded_mean(self.sub_index_samples.get(&s.id))))
            .collect();

        OrganizationRollup {
            organization: self.organization,
            respondent_count: self.submission_ids.len(),
            submission_ids: self.submission_ids,
            domains,
            sub_indices,
            degraded: self.degraded,
            computed_at: Timestamp::now(),
        }
    }

    fn rounded_mean(samples: Option<&Vec<f64>>) -> Option<f64> {
        samples.and_then(|s| mean(s.iter().copied())).map(round2)
    }
}
