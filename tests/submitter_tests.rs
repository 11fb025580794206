//! Intent submitter and session operations: vote validation, call shape,
//! and the two error-reporting paths.

mod common;

use common::*;
use stratefi_gov::chain::ClientError;
use stratefi_gov::session::submitter::{VOTE_ERROR_TITLE, VOTE_VALIDATION_MESSAGE, VOTE_VALIDATION_TITLE};
use stratefi_gov::session::{Variant, VoteError, VoteSelections};
use stratefi_gov::types::*;

fn cast_vote_args(req: &WriteRequest) -> (Vec<ProposalId>, Vec<u8>) {
    match &req.call {
        ContractCall::CastVote(c) => (
            c.proposal_ids.clone(),
            c.choices.iter().map(|c| c.code()).collect(),
        ),
        other => panic!("expected castVote, got {:?}", other),
    }
}

#[tokio::test]
async fn test_vote_without_selection_is_refused() {
    let client = MockChainClient::new();
    let (submitter, notifier) = make_submitter(client.clone());
    let votes = VoteSelections::new();

    let res = submitter.submit_vote(&votes, 0, Some(ProposalId::from(42)));
    assert!(matches!(res, Err(VoteError::Validation)));
    assert!(client.writes().is_empty(), "no outbound call expected");

    let n = notifier.drain();
    assert_eq!(n.len(), 1);
    assert_eq!(n[0].variant, Variant::Destructive);
    assert_eq!(n[0].title, VOTE_VALIDATION_TITLE);
    assert_eq!(n[0].description, "No vote selected for proposal");
}

#[tokio::test]
async fn test_vote_without_proposal_id_is_refused() {
    let client = MockChainClient::new();
    let (submitter, notifier) = make_submitter(client.clone());
    let mut votes = VoteSelections::new();
    votes.handle_vote_selection(0, VoteChoice::For);

    assert!(matches!(submitter.submit_vote(&votes, 0, None), Err(VoteError::Validation)));
    assert!(matches!(
        submitter.submit_vote(&votes, 0, Some(ProposalId::default())),
        Err(VoteError::Validation)
    ));
    assert!(client.writes().is_empty());
    assert_eq!(notifier.drain().len(), 2);
}

#[tokio::test]
async fn test_selection_for_other_index_does_not_count() {
    let client = MockChainClient::new();
    let (submitter, _notifier) = make_submitter(client.clone());
    let mut votes = VoteSelections::new();
    votes.handle_vote_selection(1, VoteChoice::For);

    assert!(submitter.submit_vote(&votes, 0, Some(ProposalId::from(5))).is_err());
    assert!(client.writes().is_empty());
}

#[tokio::test]
async fn test_vote_for_issues_one_batched_call() {
    let client = MockChainClient::new();
    let (submitter, notifier) = make_submitter(client.clone());
    let mut votes = VoteSelections::new();
    votes.handle_vote_selection(3, VoteChoice::For);

    let pending = submitter
        .submit_vote(&votes, 3, Some(ProposalId::from(7)))
        .expect("validation should pass");
    pending.await.unwrap().unwrap();

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].contract, contract());
    assert_eq!(writes[0].call.function_name(), "castVote");
    assert_eq!(cast_vote_args(&writes[0]), (vec![ProposalId::from(7)], vec![1]));
    assert!(notifier.is_empty());
}

#[tokio::test]
async fn test_against_vote_rejection_surfaces_cause() {
    let client = MockChainClient::new();
    client.reject_next_write(ClientError::Rpc {
        code: -32000,
        message: "insufficient funds".into(),
    });
    let (submitter, notifier) = make_submitter(client.clone());
    let mut votes = VoteSelections::new();
    votes.handle_vote_selection(0, VoteChoice::Against);

    let pending = submitter.submit_vote(&votes, 0, Some(ProposalId::from(42))).unwrap();
    let outcome = pending.await.unwrap();
    assert_eq!(outcome, Err(VoteError::Submission("insufficient funds".into())));

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(cast_vote_args(&writes[0]), (vec![ProposalId::from(42)], vec![0]));

    let n = notifier.drain();
    assert_eq!(n.len(), 1);
    assert_eq!(n[0].title, VOTE_ERROR_TITLE);
    assert!(n[0].description.contains("insufficient funds"));
}

#[tokio::test]
async fn test_selection_survives_submit_and_allows_resubmit() {
    let client = MockChainClient::new();
    let (submitter, _notifier) = make_submitter(client.clone());
    let mut votes = VoteSelections::new();
    votes.handle_vote_selection(0, VoteChoice::Abstain);

    submitter.submit_vote(&votes, 0, Some(ProposalId::from(1))).unwrap().await.unwrap().unwrap();
    assert_eq!(votes.get(0), Some(VoteChoice::Abstain));

    votes.handle_vote_selection(0, VoteChoice::For);
    submitter.submit_vote(&votes, 0, Some(ProposalId::from(1))).unwrap().await.unwrap().unwrap();

    let writes = client.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(cast_vote_args(&writes[0]).1, vec![2]);
    assert_eq!(cast_vote_args(&writes[1]).1, vec![1]);
}

#[tokio::test]
async fn test_proposal_success_clears_input() {
    let client = MockChainClient::new();
    let (session, _view) = make_session(client.clone());

    session.handle_input_change("Fund the audit");
    let tx = session.add_proposal().await;
    assert!(tx.is_some());
    assert_eq!(session.proposal_input(), "");

    let writes = client.writes();
    assert_eq!(writes.len(), 1);
    match &writes[0].call {
        ContractCall::Propose(p) => {
            assert_eq!(p.targets, vec![Address::ZERO]);
            assert_eq!(p.values.len(), 1);
            assert!(p.values[0].is_zero());
            assert_eq!(p.calldatas, vec![Vec::<u8>::new()]);
            assert_eq!(p.description, "Fund the audit");
        }
        other => panic!("expected propose, got {:?}", other),
    }
}

#[tokio::test]
async fn test_proposal_failure_is_silent_and_keeps_input() {
    let client = MockChainClient::new();
    client.reject_next_write(ClientError::Rpc {
        code: 4001,
        message: "User rejected the request.".into(),
    });
    let (session, _view) = make_session(client.clone());

    session.handle_input_change("Lower quorum");
    assert!(session.add_proposal().await.is_none());
    assert_eq!(session.proposal_input(), "Lower quorum");
    assert!(session.take_notifications().is_empty(), "proposal errors are log-only");
}

#[tokio::test]
async fn test_repeated_proposals_are_not_deduplicated() {
    let client = MockChainClient::new();
    let (submitter, _notifier) = make_submitter(client.clone());

    let (a, b) = tokio::join!(
        submitter.submit_proposal("same text"),
        submitter.submit_proposal("same text")
    );
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(client.writes().len(), 2);
}

#[tokio::test]
async fn test_session_vote_uses_proposal_at_index() {
    let client = MockChainClient::new();
    let (session, view) = make_session(client.clone());
    view.write()
        .await
        .on_proposal_events(vec![make_proposal(10, 500, "a"), make_proposal(20, 500, "b")]);

    session.handle_vote_selection(1, VoteChoice::For);
    session.submit_vote(1).await.unwrap().await.unwrap().unwrap();

    assert_eq!(cast_vote_args(&client.writes()[0]), (vec![ProposalId::from(20)], vec![1]));
}

#[tokio::test]
async fn test_session_vote_index_out_of_range_is_refused() {
    let client = MockChainClient::new();
    let (session, _view) = make_session(client.clone());

    session.handle_vote_selection(0, VoteChoice::For);
    assert!(matches!(session.submit_vote(0).await, Err(VoteError::Validation)));
    assert!(client.writes().is_empty());

    let n = session.take_notifications();
    assert_eq!(n.len(), 1);
    assert_eq!(n[0].description, VOTE_VALIDATION_MESSAGE);
}

#[tokio::test]
async fn test_selection_follows_index_across_replacement() {
    // Selections are keyed by position, so reordering the list moves the
    // vote to whichever proposal now sits at that index.
    let client = MockChainClient::new();
    let (session, view) = make_session(client.clone());
    view.write()
        .await
        .on_proposal_events(vec![make_proposal(1, 500, "a")]);
    session.handle_vote_selection(0, VoteChoice::Against);

    view.write()
        .await
        .on_proposal_events(vec![make_proposal(2, 500, "b"), make_proposal(1, 500, "a")]);
    session.submit_vote(0).await.unwrap().await.unwrap().unwrap();

    assert_eq!(cast_vote_args(&client.writes()[0]).0, vec![ProposalId::from(2)]);
}

#[tokio::test]
async fn test_render_includes_countdown_and_selection() {
    let client = MockChainClient::new();
    let (session, view) = make_session(client);
    {
        let mut v = view.write().await;
        v.on_block_number(1_000);
        v.on_proposal_events(vec![make_proposal(77, 1_000 + 13_292, "Treasury")]);
    }
    session.handle_vote_selection(0, VoteChoice::Abstain);

    let cards = session.render().await;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].index, 0);
    assert_eq!(cards[0].proposal_id, "77");
    assert_eq!(cards[0].description, "Treasury");
    assert_eq!(cards[0].days_remaining, 2);
    assert_eq!(cards[0].selected, Some(VoteChoice::Abstain));
}
