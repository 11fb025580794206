//! ChainView: replacement semantics and clock updates.

mod common;

use common::make_proposal;
use stratefi_gov::sync::ChainView;

#[test]
fn test_initial_view_is_empty() {
    let v = ChainView::default();
    assert_eq!(v.current_block_number(), 0);
    assert!(!v.has_proposals());
    assert!(v.proposals().is_empty());
    assert_eq!(v.time_remaining(50_000), 0);
}

#[test]
fn test_batch_replaces_whole_list() {
    let mut v = ChainView::default();
    let first = vec![make_proposal(1, 100, "a"), make_proposal(2, 200, "b")];
    assert!(v.on_proposal_events(first));

    let second = vec![make_proposal(3, 300, "c")];
    assert!(v.on_proposal_events(second.clone()));

    assert_eq!(v.proposals(), second.as_slice(), "list must be replaced, not appended");
}

#[test]
fn test_batch_order_is_preserved() {
    let mut v = ChainView::default();
    let batch = vec![
        make_proposal(9, 100, "first"),
        make_proposal(3, 100, "second"),
        make_proposal(7, 100, "third"),
    ];
    v.on_proposal_events(batch.clone());
    assert_eq!(v.proposals(), batch.as_slice());
}

#[test]
fn test_duplicate_ids_are_kept() {
    let mut v = ChainView::default();
    let batch = vec![make_proposal(5, 100, "x"), make_proposal(5, 100, "x")];
    v.on_proposal_events(batch);
    assert_eq!(v.proposals().len(), 2);
}

#[test]
fn test_empty_batch_is_ignored() {
    let mut v = ChainView::default();
    let batch = vec![make_proposal(1, 100, "a")];
    v.on_proposal_events(batch.clone());

    assert!(!v.on_proposal_events(vec![]));
    assert_eq!(v.proposals(), batch.as_slice());
}

#[test]
fn test_snapshot_survives_replacement() {
    let mut v = ChainView::default();
    v.on_proposal_events(vec![make_proposal(1, 100, "old")]);
    let snap = v.snapshot();

    v.on_proposal_events(vec![make_proposal(2, 100, "new")]);
    assert_eq!(snap[0].description, "old");
    assert_eq!(v.proposals()[0].description, "new");
}

#[test]
fn test_block_number_last_write_wins() {
    let mut v = ChainView::default();
    v.on_block_number(100);
    v.on_block_number(90);
    assert_eq!(v.current_block_number(), 90, "stale value still overwrites");

    v.on_block_number(90);
    v.on_block_number(120);
    assert_eq!(v.current_block_number(), 120);
}

#[test]
fn test_time_remaining_uses_current_block() {
    let mut v = ChainView::default();
    v.on_block_number(1_000);
    // 13292 blocks = 2 days at 13s
    assert_eq!(v.time_remaining(1_000 + 13_292), 2);

    let fast = {
        let mut f = ChainView::new(1);
        f.on_block_number(1_000);
        f
    };
    // 86400 blocks at 1s = 1 day
    assert_eq!(fast.time_remaining(1_000 + 86_400), 1);
}
