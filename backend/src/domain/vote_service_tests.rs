//! Tests for the vote submission workflow.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MockSubmissionRegistry, MockUserRegistry, MockVoteLedger, SubmissionRegistryError,
    UserRegistryError,
};
use crate::domain::{
    Category, ErrorCode, HashedSlackId, Submission, SubmissionId, SubmissionKey, Username, Voter,
};

type Service = VoteService<MockUserRegistry, MockSubmissionRegistry, MockVoteLedger>;

#[fixture]
fn ballot() -> Ballot {
    Ballot::try_from_parts("s1", "u1", "h1", "art").expect("valid ballot")
}

fn voter(vote_count: u32) -> Voter {
    let slack_id = SlackId::new("u1").expect("valid id");
    Voter::new(
        7,
        slack_id.clone(),
        HashedSlackId::new("h1").expect("valid hash"),
        Username::default_for(&slack_id),
        vote_count,
    )
}

fn submission() -> Submission {
    Submission::new(
        SubmissionKey::new(11),
        SubmissionId::new("s1").expect("valid id"),
        Category::new("art").expect("valid category"),
        0,
    )
}

fn users_returning(vote_count: u32) -> MockUserRegistry {
    let mut users = MockUserRegistry::new();
    users
        .expect_ensure_user()
        .withf(|slack_id, hashed| slack_id.as_ref() == "u1" && hashed.as_ref() == "h1")
        .times(1)
        .return_once(move |_, _| Ok(Some(voter(vote_count))));
    users
}

fn submissions_returning_row() -> MockSubmissionRegistry {
    let mut submissions = MockSubmissionRegistry::new();
    submissions
        .expect_ensure_submission()
        .withf(|id, category| id.as_ref() == "s1" && category.as_ref() == "art")
        .times(1)
        .return_once(|_, _| Ok(Some(submission())));
    submissions
}

fn ledger_with_prior_vote(already_voted: bool) -> MockVoteLedger {
    let mut ledger = MockVoteLedger::new();
    ledger
        .expect_has_voted()
        .withf(|key, slack_id, category| {
            *key == SubmissionKey::new(11) && slack_id.as_ref() == "u1" && category.as_ref() == "art"
        })
        .times(1)
        .return_once(move |_, _, _| Ok(already_voted));
    ledger
}

fn service(
    users: MockUserRegistry,
    submissions: MockSubmissionRegistry,
    ledger: MockVoteLedger,
) -> Service {
    VoteService::new(Arc::new(users), Arc::new(submissions), Arc::new(ledger))
}

const LIMIT_MESSAGE: &str = "User u1 has reached the maximum vote count of 3";
const DUPLICATE_MESSAGE: &str = "User u1 has already voted for submission s1 in category art";

#[rstest]
#[tokio::test]
async fn accepted_vote_is_recorded_against_the_surrogate_key(ballot: Ballot) {
    let mut ledger = ledger_with_prior_vote(false);
    ledger
        .expect_record_vote()
        .withf(|key, slack_id, category| {
            *key == SubmissionKey::new(11) && slack_id.as_ref() == "u1" && category.as_ref() == "art"
        })
        .times(1)
        .return_once(|_, _, _| Ok(()));

    let result = service(users_returning(0), submissions_returning_row(), ledger)
        .submit(ballot)
        .await;

    assert!(result.is_ok());
}

#[rstest]
#[case(3)]
#[case(5)]
#[tokio::test]
async fn voter_at_limit_is_rejected_before_submission_lookup(
    ballot: Ballot,
    #[case] vote_count: u32,
) {
    let mut submissions = MockSubmissionRegistry::new();
    submissions.expect_ensure_submission().never();
    let mut ledger = MockVoteLedger::new();
    ledger.expect_has_voted().never();
    ledger.expect_record_vote().never();

    let error = service(users_returning(vote_count), submissions, ledger)
        .submit(ballot)
        .await
        .expect_err("limit reached");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), LIMIT_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn prior_vote_is_rejected_without_commit(ballot: Ballot) {
    let mut ledger = ledger_with_prior_vote(true);
    ledger.expect_record_vote().never();

    let error = service(users_returning(1), submissions_returning_row(), ledger)
        .submit(ballot)
        .await
        .expect_err("duplicate vote");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_MESSAGE);
}

#[rstest]
#[case(VoteLedgerError::duplicate_vote(), DUPLICATE_MESSAGE)]
#[case(VoteLedgerError::vote_limit_reached(), LIMIT_MESSAGE)]
#[tokio::test]
async fn commit_races_map_to_conflicts(
    ballot: Ballot,
    #[case] commit_error: VoteLedgerError,
    #[case] expected: &str,
) {
    let mut ledger = ledger_with_prior_vote(false);
    ledger
        .expect_record_vote()
        .times(1)
        .return_once(move |_, _, _| Err(commit_error));

    let error = service(users_returning(2), submissions_returning_row(), ledger)
        .submit(ballot)
        .await
        .expect_err("commit conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), expected);
}

#[rstest]
#[tokio::test]
async fn missing_user_record_is_an_internal_error(ballot: Ballot) {
    let mut users = MockUserRegistry::new();
    users.expect_ensure_user().times(1).return_once(|_, _| Ok(None));
    let mut submissions = MockSubmissionRegistry::new();
    submissions.expect_ensure_submission().never();

    let error = service(users, submissions, MockVoteLedger::new())
        .submit(ballot)
        .await
        .expect_err("no user row");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Failed to ensure user exists");
}

#[rstest]
#[tokio::test]
async fn missing_submission_record_is_an_internal_error(ballot: Ballot) {
    let mut submissions = MockSubmissionRegistry::new();
    submissions
        .expect_ensure_submission()
        .times(1)
        .return_once(|_, _| Ok(None));
    let mut ledger = MockVoteLedger::new();
    ledger.expect_has_voted().never();

    let error = service(users_returning(0), submissions, ledger)
        .submit(ballot)
        .await
        .expect_err("no submission row");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Failed to ensure submission exists");
}

#[rstest]
#[tokio::test]
async fn user_registry_failure_hides_the_cause(ballot: Ballot) {
    let mut users = MockUserRegistry::new();
    users
        .expect_ensure_user()
        .times(1)
        .return_once(|_, _| Err(UserRegistryError::connection("pool exhausted")));

    let error = service(users, MockSubmissionRegistry::new(), MockVoteLedger::new())
        .submit(ballot)
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Failed to submit vote");
}

#[rstest]
#[tokio::test]
async fn submission_registry_failure_hides_the_cause(ballot: Ballot) {
    let mut submissions = MockSubmissionRegistry::new();
    submissions
        .expect_ensure_submission()
        .times(1)
        .return_once(|_, _| Err(SubmissionRegistryError::query("syntax error")));

    let error = service(users_returning(0), submissions, MockVoteLedger::new())
        .submit(ballot)
        .await
        .expect_err("storage failure");

    assert_eq!(error.message(), "Failed to submit vote");
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn ledger_failures_hide_the_cause(ballot: Ballot, #[case] fail_on_check: bool) {
    let mut ledger = MockVoteLedger::new();
    if fail_on_check {
        ledger
            .expect_has_voted()
            .times(1)
            .return_once(|_, _, _| Err(VoteLedgerError::query("relation missing")));
        ledger.expect_record_vote().never();
    } else {
        ledger.expect_has_voted().times(1).return_once(|_, _, _| Ok(false));
        ledger
            .expect_record_vote()
            .times(1)
            .return_once(|_, _, _| Err(VoteLedgerError::connection("reset by peer")));
    }

    let error = service(users_returning(0), submissions_returning_row(), ledger)
        .submit(ballot)
        .await
        .expect_err("storage failure");

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Failed to submit vote");
}
