//! Client-held assessment context.
//!
//! Nothing about a respondent's walk through the assessment lives in the
//! process between requests. Resuming returns this context; the client keeps
//! it and sends the submission id back with every save.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::ItemCatalog;
use crate::domain::foundation::{DomainId, ItemId, SubmissionId};
use crate::domain::scoring::{ItemAnswer, ResponseSet};

use super::{Submission, SubmissionProgress};

/// Everything a client needs to continue an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentContext {
    pub submission_id: SubmissionId,
    /// True when this call created the submission.
    pub created: bool,
    /// Answer state of every catalog item, keyed by item id.
    pub answers: BTreeMap<ItemId, ItemAnswer>,
    pub completed_domains: BTreeSet<DomainId>,
    /// Next domain to present; `None` once every domain is done.
    pub current_domain: Option<DomainId>,
    pub progress: SubmissionProgress,
}

impl AssessmentContext {
    pub fn build(
        catalog: &ItemCatalog,
        submission: &Submission,
        created: bool,
        responses: &ResponseSet,
        completed_domains: BTreeSet<DomainId>,
    ) -> Self {
        let answers = catalog
            .domains()
            .iter()
            .flat_map(|d| d.item_ids())
            .map(|id| (id.clone(), responses.answer(id)))
            .collect();
        let progress = SubmissionProgress::build(catalog, submission, responses, &completed_domains);
        let current_domain = progress.first_incomplete().cloned();

        Self {
            submission_id: *submission.id(),
            created,
            answers,
            completed_domains,
            current_domain,
            progress,
        }
    }

    /// Answer state of one item; items outside the catalog are unanswered.
    pub fn answer(&self, item: &ItemId) -> ItemAnswer {
        self.answers
            .get(item)
            .copied()
            .unwrap_or(ItemAnswer::Unanswered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RawScore, RespondentId};
    use crate::domain::scoring::StoredResponse;

    #[test]
    fn context_reports_every_catalog_item() {
        let catalog = ItemCatalog::embedded().unwrap();
        let submission = Submission::start(RespondentId::new("ada@example.com").unwrap());
        let responses = ResponseSet::from_responses(vec![StoredResponse::new(
            ItemId::new("AL04").unwrap(),
            RawScore::try_new(6).unwrap(),
        )]);
        let done: BTreeSet<DomainId> = [DomainId::new("alignment").unwrap()].into_iter().collect();

        let context = AssessmentContext::build(&catalog, &submission, false, &responses, done);

        assert_eq!(context.answers.len(), 40);
        assert_eq!(
            context.answer(&ItemId::new("AL04").unwrap()),
            ItemAnswer::Answered(RawScore::try_new(6).unwrap())
        );
        assert_eq!(context.answer(&ItemId::new("AL05").unwrap()), ItemAnswer::Unanswered);
        assert_eq!(context.current_domain.unwrap().as_str(), "execution");
    }
}
