//! Validation of one domain's answer batch against the catalog.

use std::collections::BTreeMap;

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainError, DomainId, ItemId, RawScore};

use super::StoredResponse;

/// A validated, ready-to-persist batch of answers for one domain.
///
/// Construction is the only validation point: once a `DomainAnswers`
/// exists, every item belongs to the domain and every score is on the
/// 1-7 scale.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainAnswers {
    domain_id: DomainId,
    responses: Vec<StoredResponse>,
}

impl DomainAnswers {
    /// Validates raw selections for `domain_id`.
    ///
    /// Items with no selection (`None`) are skipped; a later call can fill
    /// them in.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for an unknown domain, an unknown item, an item
    ///   of a different domain, or a score outside 1-7
    pub fn validate(
        catalog: &ItemCatalog,
        domain_id: &DomainId,
        answers: &BTreeMap<ItemId, Option<i64>>,
    ) -> Result<Self, DomainError> {
        if catalog.domain(domain_id).is_none() {
            return Err(DomainError::validation(
                "domain_id",
                format!("Unknown domain: {}", domain_id),
            )
            .with_detail("domain_id", domain_id.as_str()));
        }

        let mut responses = Vec::with_capacity(answers.len());
        for (item_id, selection) in answers {
            match catalog.domain_of(item_id) {
                None => {
                    return Err(DomainError::validation(
                        "item_id",
                        format!("Unknown item: {}", item_id),
                    )
                    .with_detail("domain_id", domain_id.as_str())
                    .with_detail("item_id", item_id.as_str()))
                }
                Some(owner) if owner != domain_id => {
                    return Err(DomainError::validation(
                        "item_id",
                        format!("Item {} belongs to domain {}, not {}", item_id, owner, domain_id),
                    )
                    .with_detail("domain_id", domain_id.as_str())
                    .with_detail("item_id", item_id.as_str()))
                }
                Some(_) => {}
            }

            let Some(raw) = selection else {
                continue;
            };
            let raw = RawScore::try_new(*raw).map_err(|e| {
                DomainError::from(e)
                    .with_detail("domain_id", domain_id.as_str())
                    .with_detail("item_id", item_id.as_str())
            })?;
            responses.push(StoredResponse::new(item_id.clone(), raw));
        }

        Ok(Self {
            domain_id: domain_id.clone(),
            responses,
        })
    }

    pub fn domain_id(&self) -> &DomainId {
        &self.domain_id
    }

    pub fn responses(&self) -> &[StoredResponse] {
        &self.responses
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
