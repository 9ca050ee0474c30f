use crate::domain::player::PlayerId;
use crate::domain::round::{Round, RoundStatus};
use crate::domain::scoring::RoundScore;
use crate::errors::domain::{DomainError, StateKind, ValidationKind};

fn ids(n: u32) -> Vec<PlayerId> {
    (1..=n).map(PlayerId).collect()
}

fn score(player: u32, tricks: u8) -> RoundScore {
    RoundScore {
        player_id: PlayerId(player),
        tricks_taken: tricks,
        base: 0,
        bonus: 0,
        total: 0,
    }
}

#[test]
fn new_round_starts_in_bidding_with_n_hands() {
    let round = Round::new(4, ids(3)).unwrap();
    assert_eq!(round.number(), 4);
    assert_eq!(round.required_hands(), 4);
    assert_eq!(round.status(), RoundStatus::Bidding);
    assert_eq!(round.hands_completed(), 0);
    assert!(round.bids().is_empty());
}

#[test]
fn rounds_outside_one_to_ten_do_not_exist() {
    for n in [0u8, 11, 200] {
        let err = Round::new(n, ids(2)).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidRoundNumber, _)
        ));
    }
}

#[test]
fn last_bid_wins() {
    let mut round = Round::new(3, ids(2)).unwrap();
    round.add_bid(PlayerId(1), 1).unwrap();
    round.add_bid(PlayerId(1), 3).unwrap();
    assert_eq!(round.bid_for(PlayerId(1)), Some(3));
    assert_eq!(round.bids().len(), 1);
}

#[test]
fn bids_complete_only_when_every_player_has_bid() {
    let mut round = Round::new(2, ids(3)).unwrap();
    round.add_bid(PlayerId(1), 0).unwrap();
    round.add_bid(PlayerId(2), 1).unwrap();
    assert!(!round.all_bids_complete());

    round.add_bid(PlayerId(3), 2).unwrap();
    assert!(round.all_bids_complete());
    assert_eq!(round.total_bids(), 3);
}

#[test]
fn empty_roster_never_has_complete_bids() {
    let round = Round::new(1, Vec::new()).unwrap();
    assert!(!round.all_bids_complete());
}

#[test]
fn start_playing_twice_fails() {
    let mut round = Round::new(1, ids(2)).unwrap();
    round.start_playing().unwrap();
    assert_eq!(round.status(), RoundStatus::Playing);

    let err = round.start_playing().unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::WrongPhase, _)));
    assert_eq!(err.detail(), "Cannot start playing from playing status");
}

#[test]
fn bids_rejected_outside_bidding() {
    let mut round = Round::new(2, ids(2)).unwrap();
    round.start_playing().unwrap();

    let err = round.add_bid(PlayerId(1), 1).unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::WrongPhase, _)));
    assert!(err.is_state() && !err.is_validation());
    assert_eq!(err.detail(), "Cannot add bid when status is playing");
}

#[test]
fn round_completes_on_last_hand_only() {
    let mut round = Round::new(3, ids(2)).unwrap();
    round.start_playing().unwrap();

    assert_eq!(round.complete_hand().unwrap(), RoundStatus::Playing);
    assert_eq!(round.complete_hand().unwrap(), RoundStatus::Playing);
    assert!(!round.is_completed());
    assert_eq!(round.hands_completed(), 2);

    assert_eq!(round.complete_hand().unwrap(), RoundStatus::Completed);
    assert!(round.is_completed());
    assert_eq!(round.hands_completed(), round.required_hands());
}

#[test]
fn hands_cannot_be_completed_while_bidding_or_after_completion() {
    let mut round = Round::new(1, ids(2)).unwrap();
    assert!(round.complete_hand().is_err());

    round.start_playing().unwrap();
    round.complete_hand().unwrap();
    let err = round.complete_hand().unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::WrongPhase, _)));
    assert_eq!(round.hands_completed(), 1);
}

#[test]
fn results_need_play_and_are_recorded_once() {
    let mut round = Round::new(2, ids(2)).unwrap();
    let err = round.record_result(score(1, 1)).unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::WrongPhase, _)));

    round.start_playing().unwrap();
    round.record_result(score(1, 1)).unwrap();
    let err = round.record_result(score(1, 2)).unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::AlreadyScored, _)));
    assert_eq!(round.tricks_recorded(), 1);
    assert!(!round.all_results_recorded());

    round.record_result(score(2, 1)).unwrap();
    assert!(round.all_results_recorded());
    assert_eq!(round.tricks_recorded(), 2);
}

#[test]
fn status_order_follows_lifecycle() {
    assert!(RoundStatus::Bidding < RoundStatus::Playing);
    assert!(RoundStatus::Playing < RoundStatus::Completed);
    assert_eq!(
        serde_json::to_string(&RoundStatus::Completed).unwrap(),
        "\"completed\""
    );
}
