use serde_json::json;

use crate::domain::player::PlayerId;
use crate::domain::rules::{MAX_PLAYERS, MAX_ROUNDS};
use crate::domain::snapshot::{GamePhase, GameSnapshot};
use crate::domain::state::GameState;
use crate::domain::test_state_helpers::{
    bid_current_round, finish_current_round, game_with_players,
};

fn round_trip(game: &GameState) -> GameState {
    let json = serde_json::to_string(&game.to_snapshot()).unwrap();
    let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
    GameState::from_snapshot(snapshot).unwrap()
}

fn assert_integrity(value: serde_json::Value) {
    let snapshot: GameSnapshot = serde_json::from_value(value).unwrap();
    let err = GameState::from_snapshot(snapshot).unwrap_err();
    assert!(err.is_integrity(), "got {err:?}");
}

#[test]
fn phase_follows_game_progress() {
    let mut game = game_with_players(1);
    assert_eq!(GamePhase::of(&game), GamePhase::Setup);

    game.add_player("Bob");
    assert_eq!(GamePhase::of(&game), GamePhase::Bidding);

    bid_current_round(&mut game, &[1, 0]);
    assert_eq!(GamePhase::of(&game), GamePhase::Playing);

    let mut done = game_with_players(2);
    for _ in 0..MAX_ROUNDS {
        finish_current_round(&mut done, &[0, 0], &[0, 0]);
    }
    assert_eq!(GamePhase::of(&done), GamePhase::Finished);
}

#[test]
fn snapshot_uses_persisted_field_names() {
    let mut game = game_with_players(2);
    finish_current_round(&mut game, &[1, 0], &[1, 0]);

    let value = serde_json::to_value(game.to_snapshot()).unwrap();
    assert_eq!(value["currentRound"], 2);
    assert_eq!(value["gamePhase"], "bidding");
    assert_eq!(value["players"][0]["name"], "Anne");
    assert_eq!(value["players"][0]["totalScore"], 20);
    assert_eq!(value["players"][1]["roundScores"], json!([10]));
    assert_eq!(value["rounds"][0]["status"], "completed");
    assert_eq!(value["rounds"][0]["handsCompleted"], 1);
    assert_eq!(value["rounds"][0]["bids"], json!({"1": 1, "2": 0}));
    assert_eq!(value["rounds"][1]["status"], "bidding");
}

#[test]
fn restore_round_trips_mid_game_and_finished_games() {
    let mut game = game_with_players(3);
    finish_current_round(&mut game, &[1, 0, 0], &[1, 0, 0]);
    bid_current_round(&mut game, &[2, 0, 1]);
    assert_eq!(round_trip(&game), game);

    let mut done = game_with_players(2);
    for r in 1..=MAX_ROUNDS {
        finish_current_round(&mut done, &[r, 0], &[r, 0]);
    }
    let restored = round_trip(&done);
    assert!(restored.is_complete());
    assert_eq!(restored, done);
}

#[test]
fn restored_game_keeps_assigning_fresh_ids() {
    let game = game_with_players(2);
    let mut restored = round_trip(&game);
    let id = restored.add_player("Cleo").id();
    assert_eq!(id.0, 3);
}

fn base_snapshot() -> serde_json::Value {
    json!({
        "players": [
            {"id": 1, "name": "Anne", "totalScore": 20, "roundScores": [20]},
            {"id": 2, "name": "Bob", "totalScore": 10, "roundScores": [10]}
        ],
        "rounds": [
            {
                "number": 1, "status": "completed", "bids": {"1": 1, "2": 0},
                "handsCompleted": 1,
                "results": [
                    {"playerId": 1, "tricksTaken": 1, "base": 20, "bonus": 0, "total": 20},
                    {"playerId": 2, "tricksTaken": 0, "base": 10, "bonus": 0, "total": 10}
                ]
            },
            {"number": 2, "status": "bidding", "bids": {}, "handsCompleted": 0}
        ],
        "currentRound": 2,
        "gamePhase": "bidding"
    })
}

#[test]
fn base_snapshot_is_valid() {
    let snapshot: GameSnapshot = serde_json::from_value(base_snapshot()).unwrap();
    let game = GameState::from_snapshot(snapshot).unwrap();
    assert_eq!(game.current_round_number(), 2);
    assert_eq!(game.round(2).unwrap().players().len(), 2);
}

#[test]
fn mismatched_total_fails_to_parse() {
    let mut value = base_snapshot();
    value["players"][0]["totalScore"] = json!(25);
    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}

#[test]
fn gap_in_round_numbers_is_rejected() {
    let mut value = base_snapshot();
    value["rounds"][1]["number"] = json!(3);
    value["currentRound"] = json!(3);
    assert_integrity(value);
}

#[test]
fn unfinished_earlier_round_is_rejected() {
    let mut value = base_snapshot();
    value["rounds"][0]["status"] = json!("playing");
    value["rounds"][0]["handsCompleted"] = json!(0);
    assert_integrity(value);
}

#[test]
fn hands_inconsistent_with_status_are_rejected() {
    let mut value = base_snapshot();
    value["rounds"][1]["handsCompleted"] = json!(1);
    assert_integrity(value);
}

#[test]
fn out_of_range_bid_is_rejected() {
    let mut value = base_snapshot();
    value["rounds"][0]["bids"]["1"] = json!(2);
    assert_integrity(value);
}

#[test]
fn bid_from_unknown_player_is_rejected() {
    let mut value = base_snapshot();
    value["rounds"][1]["bids"] = json!({"9": 1});
    assert_integrity(value);
}

#[test]
fn history_must_match_round_results() {
    let mut value = base_snapshot();
    value["players"][1]["totalScore"] = json!(-10);
    value["players"][1]["roundScores"] = json!([-10]);
    assert_integrity(value);
}

#[test]
fn stored_phase_must_match_derived_phase() {
    let mut value = base_snapshot();
    value["gamePhase"] = json!("playing");
    assert_integrity(value);

    let mut value = base_snapshot();
    value["gamePhase"] = json!("finished");
    assert_integrity(value);
}

#[test]
fn current_round_must_be_the_last_round() {
    let mut value = base_snapshot();
    value["currentRound"] = json!(1);
    assert_integrity(value);
}

#[test]
fn completed_last_round_before_ten_is_rejected() {
    let mut value = base_snapshot();
    let first = value["rounds"][0].clone();
    value["rounds"] = json!([first]);
    value["currentRound"] = json!(1);
    value["gamePhase"] = json!("playing");
    assert_integrity(value);
}

#[test]
fn duplicate_player_names_are_rejected() {
    let mut value = base_snapshot();
    value["players"][1]["name"] = json!("anne");
    assert_integrity(value);
}

fn open_game(ids: &[u32]) -> serde_json::Value {
    let players: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({"id": id, "name": format!("P{id}"), "totalScore": 0, "roundScores": []}))
        .collect();
    json!({
        "players": players,
        "rounds": [{"number": 1, "status": "bidding", "bids": {}, "handsCompleted": 0}],
        "currentRound": 1,
        "gamePhase": "bidding"
    })
}

#[test]
fn oversized_roster_is_rejected() {
    let full: Vec<u32> = (1..=MAX_PLAYERS as u32).collect();
    let snapshot: GameSnapshot = serde_json::from_value(open_game(&full)).unwrap();
    assert_eq!(GameState::from_snapshot(snapshot).unwrap().players().len(), MAX_PLAYERS);

    let twelve: Vec<u32> = (1..=12).collect();
    assert_integrity(open_game(&twelve));
}

#[test]
fn highest_player_id_must_leave_room_for_the_next() {
    assert_integrity(open_game(&[1, u32::MAX]));

    let snapshot: GameSnapshot = serde_json::from_value(open_game(&[1, 7])).unwrap();
    let mut game = GameState::from_snapshot(snapshot).unwrap();
    assert_eq!(game.add_player("Cleo").id(), PlayerId(8));
}

#[test]
fn overflowing_scores_are_rejected_not_wrapped() {
    let mut value = base_snapshot();
    value["rounds"][0]["results"][0]["base"] = json!(i32::MAX);
    value["rounds"][0]["results"][0]["bonus"] = json!(1);
    assert_integrity(value);

    let mut value = base_snapshot();
    value["players"][0]["roundScores"] = json!([i32::MAX, 1]);
    value["players"][0]["totalScore"] = json!(i32::MIN);
    assert!(serde_json::from_value::<GameSnapshot>(value).is_err());
}
