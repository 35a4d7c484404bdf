//! End-to-end assessment lifecycle over the in-memory adapters.
//!
//! Drives the application handlers the way the HTTP layer does: resume,
//! save domains, complete, score, roll up, and report team status.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::sync::Arc;

use org_assessment::adapters::memory::{InMemoryAssessmentStore, InMemoryRespondentDirectory};
use org_assessment::adapters::notification::RecordingNotificationDispatcher;
use org_assessment::application::handlers::assessment::{
    CompleteDomainCommand, CompleteDomainHandler, ResumeAssessmentCommand,
    ResumeAssessmentHandler, SubmitDomainCommand, SubmitDomainHandler,
};
use org_assessment::application::handlers::completion::{
    GetCompletedDomainsHandler, GetCompletedDomainsQuery,
};
use org_assessment::application::handlers::responses::{LoadResponsesHandler, LoadResponsesQuery};
use org_assessment::application::handlers::scoring::{
    GetOrganizationRollupHandler, GetOrganizationRollupQuery,
};
use org_assessment::application::handlers::submission::{
    GetLatestStatusHandler, GetLatestStatusQuery,
};
use org_assessment::application::handlers::team::{
    GetTeamStatusHandler, GetTeamStatusQuery, SendRemindersCommand, SendRemindersHandler,
};
use org_assessment::domain::catalog::ItemCatalog;
use org_assessment::domain::foundation::{
    DomainId, ItemId, OrganizationName, RawScore, RespondentId, RespondentProfile, Role,
    SubmissionId, SubmissionStatus, Timestamp,
};
use org_assessment::domain::scoring::{ItemAnswer, StoredResponse};
use org_assessment::domain::submission::{AssessmentError, LatestSubmissionStatus, Submission};
use org_assessment::ports::{
    DomainCompletionStore, RespondentDirectory, ResponseStore, SubmissionRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const DOMAINS: [(&str, &str); 4] = [
    ("alignment", "AL"),
    ("execution", "EX"),
    ("collaboration", "CO"),
    ("adaptability", "AD"),
];

struct Harness {
    catalog: Arc<ItemCatalog>,
    store: Arc<InMemoryAssessmentStore>,
}

impl Harness {
    fn new() -> Self {
        Self {
            catalog: Arc::new(ItemCatalog::embedded().unwrap()),
            store: Arc::new(InMemoryAssessmentStore::new()),
        }
    }

    fn submissions(&self) -> Arc<dyn SubmissionRepository> {
        self.store.clone()
    }

    fn responses(&self) -> Arc<dyn ResponseStore> {
        self.store.clone()
    }

    fn completions(&self) -> Arc<dyn DomainCompletionStore> {
        self.store.clone()
    }

    fn resume(&self) -> ResumeAssessmentHandler {
        ResumeAssessmentHandler::new(
            self.catalog.clone(),
            self.submissions(),
            self.responses(),
            self.completions(),
        )
    }

    fn submit(&self) -> SubmitDomainHandler {
        SubmitDomainHandler::new(
            self.catalog.clone(),
            self.submissions(),
            self.responses(),
            self.completions(),
        )
    }

    fn complete(&self) -> CompleteDomainHandler {
        CompleteDomainHandler::new(
            self.catalog.clone(),
            self.submissions(),
            self.responses(),
            self.completions(),
        )
    }

    fn completed_domains(&self) -> GetCompletedDomainsHandler {
        GetCompletedDomainsHandler::new(self.completions())
    }

    fn latest_status(&self) -> GetLatestStatusHandler {
        GetLatestStatusHandler::new(self.catalog.clone(), self.submissions(), self.completions())
    }

    async fn submit_items(
        &self,
        respondent: &RespondentId,
        submission_id: SubmissionId,
        domain: &str,
        items: RangeInclusive<u8>,
        raw: i64,
    ) -> Result<org_assessment::application::handlers::assessment::DomainOutcome, AssessmentError>
    {
        self.submit()
            .handle(SubmitDomainCommand {
                respondent_id: respondent.clone(),
                submission_id,
                domain_id: domain_id(domain),
                answers: answers(domain, items, raw),
            })
            .await
    }

    async fn completed(&self, respondent: &RespondentId, submission_id: SubmissionId) -> BTreeSet<DomainId> {
        self.completed_domains()
            .handle(GetCompletedDomainsQuery {
                respondent_id: respondent.clone(),
                submission_id,
            })
            .await
            .unwrap()
    }
}

fn respondent(name: &str) -> RespondentId {
    RespondentId::new(format!("{}@example.com", name)).unwrap()
}

fn domain_id(domain: &str) -> DomainId {
    DomainId::new(domain).unwrap()
}

fn prefix_of(domain: &str) -> &'static str {
    DOMAINS
        .iter()
        .find(|(id, _)| *id == domain)
        .map(|(_, prefix)| *prefix)
        .unwrap()
}

fn item(domain: &str, n: u8) -> ItemId {
    ItemId::new(format!("{}{:02}", prefix_of(domain), n)).unwrap()
}

fn answers(domain: &str, items: RangeInclusive<u8>, raw: i64) -> BTreeMap<ItemId, Option<i64>> {
    items.map(|n| (item(domain, n), Some(raw))).collect()
}

fn profile(name: &str, organization: &str, role: Role) -> RespondentProfile {
    RespondentProfile::new(
        respondent(name),
        Some(name.to_string()),
        OrganizationName::new(organization).unwrap(),
        role,
    )
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn six_then_four_answers_completes_alignment_then_submission() {
    let h = Harness::new();
    let ada = respondent("ada");
    let context = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap();
    assert!(context.created);
    let id = context.submission_id;

    let outcome = h.submit_items(&ada, id, "alignment", 1..=6, 5).await.unwrap();
    assert_eq!(outcome.saved, 6);
    assert!(!outcome.domain_done);
    assert!(!h.completed(&ada, id).await.contains(&domain_id("alignment")));

    h.submit_items(&ada, id, "alignment", 7..=10, 3).await.unwrap();
    let outcome = h
        .complete()
        .handle(CompleteDomainCommand {
            respondent_id: ada.clone(),
            submission_id: id,
            domain_id: domain_id("alignment"),
        })
        .await
        .unwrap();
    assert!(outcome.domain_done);
    assert!(!outcome.submission_completed);
    assert!(h.completed(&ada, id).await.contains(&domain_id("alignment")));

    for domain in ["execution", "collaboration"] {
        let outcome = h.submit_items(&ada, id, domain, 1..=10, 6).await.unwrap();
        assert!(outcome.domain_done);
        assert!(!outcome.submission_completed);
    }
    let status = h.submissions().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(status.status(), SubmissionStatus::InProgress);

    let outcome = h.submit_items(&ada, id, "adaptability", 1..=10, 7).await.unwrap();
    assert!(outcome.submission_completed);
    assert!(outcome.progress.is_complete());

    let stored = h.submissions().find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), SubmissionStatus::Completed);
    assert!(stored.completed_at().is_some());
    assert_eq!(h.completed(&ada, id).await.len(), 4);
}

#[tokio::test]
async fn completing_a_domain_with_gaps_names_missing_items() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;
    h.submit_items(&ada, id, "execution", 1..=8, 4).await.unwrap();

    let err = h
        .complete()
        .handle(CompleteDomainCommand {
            respondent_id: ada.clone(),
            submission_id: id,
            domain_id: domain_id("execution"),
        })
        .await
        .unwrap_err();

    match err {
        AssessmentError::IncompleteDomain { domain_id: d, missing } => {
            assert_eq!(d.as_str(), "execution");
            assert_eq!(missing, vec![item("execution", 9), item("execution", 10)]);
        }
        other => panic!("expected IncompleteDomain, got {:?}", other),
    }
    assert!(h.completed(&ada, id).await.is_empty());
}

#[tokio::test]
async fn out_of_range_score_rejected_before_any_write() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;

    let mut batch = answers("alignment", 1..=3, 5);
    batch.insert(item("alignment", 4), Some(8));
    let err = h
        .submit()
        .handle(SubmitDomainCommand {
            respondent_id: ada.clone(),
            submission_id: id,
            domain_id: domain_id("alignment"),
            answers: batch,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AssessmentError::ValidationFailed { .. }));
    assert_eq!(h.store.response_count(&id).await, 0);
}

#[tokio::test]
async fn completed_submission_rejects_writes_and_resume_starts_fresh() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;
    for (domain, _) in DOMAINS {
        h.submit_items(&ada, id, domain, 1..=10, 4).await.unwrap();
    }

    let err = h.submit_items(&ada, id, "alignment", 1..=1, 1).await.unwrap_err();
    assert!(matches!(err, AssessmentError::InvalidState(_)));

    let next = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap();
    assert!(next.created);
    assert_ne!(next.submission_id, id);
}

#[tokio::test]
async fn other_respondent_cannot_write_to_submission() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;

    let err = h
        .submit_items(&respondent("mallory"), id, "alignment", 1..=2, 4)
        .await
        .unwrap_err();
    assert_eq!(err, AssessmentError::Forbidden);
    assert_eq!(h.store.response_count(&id).await, 0);
}

// =============================================================================
// Store properties
// =============================================================================

#[tokio::test]
async fn identical_saves_leave_identical_state() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;

    h.submit_items(&ada, id, "collaboration", 1..=5, 2).await.unwrap();
    let first = h.responses().load_responses(&id).await.unwrap();
    h.submit_items(&ada, id, "collaboration", 1..=5, 2).await.unwrap();
    let second = h.responses().load_responses(&id).await.unwrap();

    assert_eq!(h.store.response_count(&id).await, 5);
    assert_eq!(first, second);
}

#[tokio::test]
async fn completion_flag_survives_later_resaves() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;

    h.submit_items(&ada, id, "alignment", 1..=10, 5).await.unwrap();
    assert!(h.completed(&ada, id).await.contains(&domain_id("alignment")));

    h.submit_items(&ada, id, "alignment", 1..=3, 1).await.unwrap();
    assert!(h.completed(&ada, id).await.contains(&domain_id("alignment")));
}

#[tokio::test]
async fn resume_reconstructs_saved_scores_and_reports_gaps() {
    let h = Harness::new();
    let ada = respondent("ada");
    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;
    h.submit_items(&ada, id, "alignment", 1..=10, 6).await.unwrap();
    h.submit_items(&ada, id, "execution", 1..=3, 2).await.unwrap();

    let context = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap();

    assert!(!context.created);
    assert_eq!(context.submission_id, id);
    assert_eq!(context.answers.len(), 40);
    assert_eq!(
        context.answers[&item("alignment", 10)],
        ItemAnswer::Answered(RawScore::try_new(6).unwrap())
    );
    assert_eq!(
        context.answers[&item("execution", 2)],
        ItemAnswer::Answered(RawScore::try_new(2).unwrap())
    );
    assert_eq!(context.answers[&item("execution", 4)], ItemAnswer::Unanswered);
    assert_eq!(context.answers[&item("adaptability", 1)], ItemAnswer::Unanswered);
    assert_eq!(context.current_domain, Some(domain_id("execution")));

    let loaded = LoadResponsesHandler::new(h.catalog.clone(), h.submissions(), h.responses())
        .handle(LoadResponsesQuery {
            respondent_id: ada.clone(),
            submission_id: id,
        })
        .await
        .unwrap();
    assert_eq!(loaded.answers, context.answers);
}

#[tokio::test]
async fn concurrent_resumes_share_one_submission() {
    let h = Harness::new();
    let ada = respondent("ada");
    let handler = Arc::new(h.resume());

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let handler = handler.clone();
            let ada = ada.clone();
            tokio::spawn(async move {
                handler
                    .handle(ResumeAssessmentCommand { respondent_id: ada })
                    .await
                    .unwrap()
                    .submission_id
            })
        })
        .collect();

    let mut ids = BTreeSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap());
    }
    assert_eq!(ids.len(), 1);
    assert_eq!(h.store.submission_count(&ada).await, 1);
}

#[tokio::test]
async fn latest_status_tracks_progress() {
    let h = Harness::new();
    let ada = respondent("ada");
    let status = h
        .latest_status()
        .handle(GetLatestStatusQuery {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap();
    assert_eq!(status, LatestSubmissionStatus::NotStarted);

    let id = h
        .resume()
        .handle(ResumeAssessmentCommand {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap()
        .submission_id;
    h.submit_items(&ada, id, "alignment", 1..=10, 4).await.unwrap();

    let status = h
        .latest_status()
        .handle(GetLatestStatusQuery {
            respondent_id: ada.clone(),
        })
        .await
        .unwrap();
    assert_eq!(status.label(), "In progress (1/4)");
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn rollup_uses_only_latest_submission_per_respondent() {
    let h = Harness::new();
    let ada = respondent("ada");
    let directory = Arc::new(InMemoryRespondentDirectory::with_profiles([profile(
        "ada",
        "Acme",
        Role::Member,
    )]));

    let t3 = Timestamp::now();
    let t2 = t3.plus_secs(-3600);
    let t1 = t3.plus_secs(-7200);
    let mut latest_id = None;
    for (started, raw, completed) in [(t1, 1, true), (t2, 4, true), (t3, 7, false)] {
        let submission = Submission::reconstitute(
            SubmissionId::new(),
            ada.clone(),
            if completed {
                SubmissionStatus::Completed
            } else {
                SubmissionStatus::InProgress
            },
            started,
            completed.then(|| started.plus_secs(600)),
        );
        let id = *submission.id();
        h.store.insert_submission(submission).await;
        h.responses()
            .save_responses(
                &id,
                &domain_id("alignment"),
                &[StoredResponse::new(
                    item("alignment", 1),
                    RawScore::try_new(raw).unwrap(),
                )],
            )
            .await
            .unwrap();
        latest_id = Some(id);
    }

    let rollup = GetOrganizationRollupHandler::new(
        h.catalog.clone(),
        directory,
        h.submissions(),
        h.responses(),
    )
    .handle(GetOrganizationRollupQuery {
        organization: OrganizationName::new("Acme").unwrap(),
    })
    .await
    .unwrap();

    assert_eq!(rollup.respondent_count, 1);
    assert_eq!(rollup.submission_ids, vec![latest_id.unwrap()]);
    assert_eq!(rollup.domains[&domain_id("alignment")], Some(100.0));
    assert_eq!(rollup.domains[&domain_id("execution")], None);
    assert!(!rollup.is_degraded());
}

#[tokio::test]
async fn rollup_degrades_unreadable_submission_instead_of_failing() {
    let h = Harness::new();
    let directory = Arc::new(InMemoryRespondentDirectory::with_profiles([
        profile("ada", "Acme", Role::Member),
        profile("bo", "Acme", Role::Member),
    ]));

    let mut ids = Vec::new();
    for (name, raw) in [("ada", 7), ("bo", 1)] {
        let id = h
            .resume()
            .handle(ResumeAssessmentCommand {
                respondent_id: respondent(name),
            })
            .await
            .unwrap()
            .submission_id;
        h.submit_items(&respondent(name), id, "alignment", 1..=10, raw)
            .await
            .unwrap();
        ids.push(id);
    }
    h.store.fail_response_loads(ids[1]).await;

    let rollup = GetOrganizationRollupHandler::new(
        h.catalog.clone(),
        directory,
        h.submissions(),
        h.responses(),
    )
    .handle(GetOrganizationRollupQuery {
        organization: OrganizationName::new("Acme").unwrap(),
    })
    .await
    .unwrap();

    assert!(rollup.is_degraded());
    assert_eq!(rollup.domains[&domain_id("alignment")], Some(100.0));
}

async fn seed_team(h: &Harness) -> Arc<InMemoryRespondentDirectory> {
    let directory = Arc::new(InMemoryRespondentDirectory::with_profiles([profile(
        "boss",
        "Acme",
        Role::Administrator,
    )]));
    for n in 0..8 {
        let name = format!("member{}", n);
        directory.register(profile(&name, "Acme", Role::Member)).await;

        let id = h
            .resume()
            .handle(ResumeAssessmentCommand {
                respondent_id: respondent(&name),
            })
            .await
            .unwrap()
            .submission_id;
        let finished = if n < 5 { DOMAINS.len() } else { 1 };
        for (domain, _) in DOMAINS.iter().take(finished) {
            h.submit_items(&respondent(&name), id, domain, 1..=10, 5)
                .await
                .unwrap();
        }
    }
    directory
}

#[tokio::test]
async fn team_of_eight_with_five_completed() {
    let h = Harness::new();
    let directory = seed_team(&h).await;

    let report = GetTeamStatusHandler::new(
        h.catalog.clone(),
        directory,
        h.submissions(),
        h.completions(),
    )
    .handle(GetTeamStatusQuery {
        administrator_id: respondent("boss"),
    })
    .await
    .unwrap();

    assert_eq!(report.completed_count, 5);
    assert_eq!(report.total_members, 8);
    assert!(!report.all_completed);
    assert_eq!(report.reminder_targets().len(), 3);
}

#[tokio::test]
async fn reminders_go_to_incomplete_members_only() {
    let h = Harness::new();
    let directory = seed_team(&h).await;
    let directory_port: Arc<dyn RespondentDirectory> = directory;
    let team_status = Arc::new(GetTeamStatusHandler::new(
        h.catalog.clone(),
        directory_port,
        h.submissions(),
        h.completions(),
    ));
    let dispatcher = Arc::new(RecordingNotificationDispatcher::new());
    dispatcher.fail_for(respondent("member7")).await;

    let result = SendRemindersHandler::new(team_status, dispatcher.clone())
        .handle(SendRemindersCommand {
            administrator_id: respondent("boss"),
        })
        .await
        .unwrap();

    assert_eq!(result.targeted.len(), 3);
    dispatcher.wait_for_attempts(3).await;
    let recipients: BTreeSet<_> = dispatcher
        .sent()
        .await
        .into_iter()
        .map(|n| n.recipient)
        .collect();
    assert_eq!(
        recipients,
        BTreeSet::from([respondent("member5"), respondent("member6")])
    );
}
