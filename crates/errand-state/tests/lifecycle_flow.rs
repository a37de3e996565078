//! End-to-end lifecycle scenarios: full happy path with settlement and
//! reviews, cancellation after matching, and dispute-driven resolution.

use errand_core::{Krw, UserId};
use errand_rules::{ErrandStatus, PenaltyLevel};
use errand_state::{
    DisputeOutcome, DisputeStatus, Errand, ErrandCategory, Party, ReviewTarget,
};

fn post_grocery_run(reward: u64) -> Errand {
    Errand::post(
        "Grocery run",
        "Buy milk and eggs from the corner store",
        ErrandCategory::Convenience,
        Krw(reward),
        Party::registered("jiyoung", UserId::new()),
    )
}

#[test]
fn happy_path_settles_and_collects_reviews() {
    let mut errand = post_grocery_run(10_000);
    errand.assign_helper(Party::registered("minsu", UserId::new())).unwrap();
    errand.start().unwrap();
    errand.complete().unwrap();

    assert_eq!(errand.status, ErrandStatus::Done);
    let settlement = errand.settlement.as_ref().unwrap();
    assert_eq!(settlement.platform_fee, Krw(1_000));
    assert_eq!(settlement.helper_payout, Krw(9_000));
    assert_eq!(
        settlement.platform_fee + settlement.helper_payout,
        errand.reward
    );
    assert!(!settlement.paid);

    errand.mark_settlement_paid().unwrap();
    assert!(errand.settlement.as_ref().unwrap().paid);

    errand
        .add_review(
            Party::guest("jiyoung"),
            ReviewTarget::Helper,
            5,
            Some("got everything on the list".to_string()),
        )
        .unwrap();
    errand
        .add_review(Party::guest("minsu"), ReviewTarget::Requester, 4, None)
        .unwrap();
    assert_eq!(errand.reviews.len(), 2);

    // Three lifecycle transitions, all recorded in order.
    let path: Vec<_> = errand.transitions.iter().map(|t| t.to_status).collect();
    assert_eq!(
        path,
        vec![
            ErrandStatus::Matched,
            ErrandStatus::InProgress,
            ErrandStatus::Done
        ]
    );
}

#[test]
fn matched_cancellation_charges_the_documented_penalty() {
    // reward=10000, cancelled from matched with a helper assigned:
    // penalty 2000, compensation 2000, medium-after-match reason.
    let mut errand = post_grocery_run(10_000);
    errand.assign_helper(Party::guest("minsu")).unwrap();
    errand.cancel().unwrap();

    assert_eq!(errand.status, ErrandStatus::Cancelled);
    let cancellation = errand.cancellation.as_ref().unwrap();
    assert_eq!(cancellation.level, PenaltyLevel::Medium);
    assert_eq!(cancellation.requester_penalty, Krw(2_000));
    assert_eq!(cancellation.helper_compensation, Krw(2_000));
    assert_eq!(cancellation.reason, "cancelled after match (medium penalty)");
    assert!(errand.settlement.is_none());
}

#[test]
fn pre_match_cancellation_is_free_and_uncompensated() {
    let mut errand = post_grocery_run(50_000);
    errand.cancel().unwrap();

    let cancellation = errand.cancellation.as_ref().unwrap();
    assert_eq!(cancellation.level, PenaltyLevel::None);
    assert_eq!(cancellation.requester_penalty, Krw::ZERO);
    assert_eq!(cancellation.helper_compensation, Krw::ZERO);
}

#[test]
fn dispute_resolution_reuses_the_settlement_path() {
    let mut errand = post_grocery_run(20_000);
    errand.assign_helper(Party::guest("minsu")).unwrap();
    errand.start().unwrap();
    errand
        .open_dispute(Party::guest("minsu"), "requester will not approve completion")
        .unwrap();

    errand
        .resolve_dispute(Party::guest("ops-admin"), DisputeOutcome::Done)
        .unwrap();

    assert_eq!(errand.status, ErrandStatus::Done);
    let settlement = errand.settlement.as_ref().unwrap();
    assert_eq!(settlement.platform_fee, Krw(2_000));
    assert_eq!(settlement.helper_payout, Krw(18_000));

    let dispute = errand.dispute.as_ref().unwrap();
    assert_eq!(dispute.status, DisputeStatus::Resolved);
    assert_eq!(
        dispute.resolution.as_ref().unwrap().outcome,
        DisputeOutcome::Done
    );
}

#[test]
fn dispute_resolution_reuses_the_penalty_path() {
    let mut errand = post_grocery_run(100_000);
    errand.assign_helper(Party::guest("minsu")).unwrap();
    errand.start().unwrap();
    errand
        .open_dispute(Party::guest("jiyoung"), "helper stopped responding")
        .unwrap();

    errand
        .resolve_dispute(Party::guest("ops-admin"), DisputeOutcome::Cancelled)
        .unwrap();

    assert_eq!(errand.status, ErrandStatus::Cancelled);
    // 30% of 100 000 would be 30 000; the in-progress cap binds at 3 000.
    let cancellation = errand.cancellation.as_ref().unwrap();
    assert_eq!(cancellation.requester_penalty, Krw(3_000));
    assert_eq!(cancellation.helper_compensation, Krw(3_000));
}

#[test]
fn terminal_record_is_immutable_except_disputes_and_reviews() {
    let mut errand = post_grocery_run(10_000);
    errand.assign_helper(Party::guest("minsu")).unwrap();
    errand.start().unwrap();
    errand.complete().unwrap();

    assert!(errand.cancel().is_err());
    assert!(errand.start().is_err());
    assert!(errand.assign_helper(Party::guest("other")).is_err());

    errand
        .open_dispute(Party::guest("jiyoung"), "item was damaged")
        .unwrap();
    errand
        .resolve_dispute(Party::guest("ops-admin"), DisputeOutcome::Cancelled)
        .unwrap();

    // Dispute resolved, but the recorded settlement decision stands.
    assert_eq!(errand.status, ErrandStatus::Done);
    assert!(errand.settlement.is_some());
    assert!(errand.cancellation.is_none());
}
