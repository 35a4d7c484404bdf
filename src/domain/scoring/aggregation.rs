//! Sub-index and domain aggregation for a single submission.
//!
//! A sub-index score is the mean of the normalized scores of its answered
//! items. A domain score is the mean of the domain's sub-index scores that
//! have data; a domain with no sub-indices defined falls back to the mean of
//! its answered items. The catalog guarantees a domain's sub-indices
//! partition its items, so every item weighs in exactly once. "No data" is
//! `None`, never zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{round2, DomainId, SubIndexId, SubmissionId};

use super::ResponseSet;

/// Arithmetic mean of the values present, `None` when there are none.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Scores every sub-index in the catalog for one response set.
pub fn sub_index_scores(
    catalog: &ItemCatalog,
    responses: &ResponseSet,
) -> BTreeMap<SubIndexId, Option<f64>> {
    catalog
        .sub_indices()
        .iter()
        .map(|sub_index| {
            let score = mean(sub_index.items.iter().filter_map(|i| responses.normalized(i)));
            (sub_index.id.clone(), score)
        })
        .collect()
}

/// Scores one domain; `None` for an unknown domain or one without data.
pub fn domain_score(
    catalog: &ItemCatalog,
    responses: &ResponseSet,
    domain_id: &DomainId,
) -> Option<f64> {
    let domain = catalog.domain(domain_id)?;
    let mut sub_indices = catalog.sub_indices_for(domain_id).peekable();
    if sub_indices.peek().is_none() {
        return mean(domain.item_ids().filter_map(|i| responses.normalized(i)));
    }
    mean(sub_indices.filter_map(|s| mean(s.items.iter().filter_map(|i| responses.normalized(i)))))
}

/// Sub-index and domain scores of one submission.
///
/// Values are unrounded; call [`Scorecard::rounded`] before publishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub submission_id: SubmissionId,
    pub answered_items: usize,
    pub domains: BTreeMap<DomainId, Option<f64>>,
    pub sub_indices: BTreeMap<SubIndexId, Option<f64>>,
}

impl Scorecard {
    /// Computes every domain and sub-index score for a submission.
    pub fn compute(
        catalog: &ItemCatalog,
        submission_id: SubmissionId,
        responses: &ResponseSet,
    ) -> Self {
        let domains = catalog
            .domains()
            .iter()
            .map(|d| (d.id.clone(), domain_score(catalog, responses, &d.id)))
            .collect();
        Self {
            submission_id,
            answered_items: responses.len(),
            domains,
            sub_indices: sub_index_scores(catalog, responses),
        }
    }

    /// Copy with every value rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            submission_id: self.submission_id,
            answered_items: self.answered_items,
            domains: round_map(&self.domains),
            sub_indices: round_map(&self.sub_indices),
        }
    }
}

fn round_map<K: Clone + Ord>(
    values: &BTreeMap<K, Option<f64>>,
) -> BTreeMap<K, Option<f64>> {
    values
        .iter()
        .map(|(k, v)| (k.clone(), v.map(round2)))
        .collect()
}
