//! Stored responses for one submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::DomainDefinition;
use crate::domain::foundation::{ItemId, NormalizedScore, RawScore};

/// One persisted (submission, item) row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub item_id: ItemId,
    pub raw_score: RawScore,
    pub normalized_score: NormalizedScore,
}

impl StoredResponse {
    /// Builds a response, deriving the normalized score from the raw score.
    pub fn new(item_id: ItemId, raw_score: RawScore) -> Self {
        Self {
            item_id,
            normalized_score: raw_score.normalized(),
            raw_score,
        }
    }
}

/// Answer state of a single item as reported to a resuming client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "raw_score", rename_all = "snake_case")]
pub enum ItemAnswer {
    Answered(RawScore),
    Unanswered,
}

impl ItemAnswer {
    pub fn is_answered(&self) -> bool {
        matches!(self, ItemAnswer::Answered(_))
    }
}

/// Every stored response of one submission, keyed by item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSet {
    by_item: BTreeMap<ItemId, StoredResponse>,
}

impl ResponseSet {
    /// Builds a set from stored rows; a later row for the same item wins.
    pub fn from_responses(responses: impl IntoIterator<Item = StoredResponse>) -> Self {
        let by_item = responses
            .into_iter()
            .map(|r| (r.item_id.clone(), r))
            .collect();
        Self { by_item }
    }

    pub fn len(&self) -> usize {
        self.by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }

    pub fn get(&self, item: &ItemId) -> Option<&StoredResponse> {
        self.by_item.get(item)
    }

    /// Answer state of an item; never-saved items are `Unanswered`, not zero.
    pub fn answer(&self, item: &ItemId) -> ItemAnswer {
        self.by_item
            .get(item)
            .map(|r| ItemAnswer::Answered(r.raw_score))
            .unwrap_or(ItemAnswer::Unanswered)
    }

    /// Normalized score of an item, if answered.
    pub fn normalized(&self, item: &ItemId) -> Option<f64> {
        self.by_item.get(item).map(|r| r.normalized_score.value())
    }

    /// Number of the domain's items that have a stored score.
    pub fn answered_in(&self, domain: &DomainDefinition) -> usize {
        domain
            .item_ids()
            .filter(|id| self.by_item.contains_key(*id))
            .count()
    }

    /// The domain's items that still lack a stored score, in catalog order.
    pub fn missing_in(&self, domain: &DomainDefinition) -> Vec<ItemId> {
        domain
            .item_ids()
            .filter(|id| !self.by_item.contains_key(*id))
            .cloned()
            .collect()
    }

    /// Raw scores of every answered item.
    pub fn raw_scores(&self) -> BTreeMap<ItemId, RawScore> {
        self.by_item
            .iter()
            .map(|(id, r)| (id.clone(), r.raw_score))
            .collect()
    }

    /// Returns a copy with `incoming` applied over the stored rows.
    pub fn merged_with(&self, incoming: &[StoredResponse]) -> Self {
        let mut by_item = self.by_item.clone();
        for response in incoming {
            by_item.insert(response.item_id.clone(), response.clone());
        }
        Self { by_item }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredResponse> {
        self.by_item.values()
    }
}
