//! Test-only game builders for domain unit tests.

use crate::domain::player::PlayerId;
use crate::domain::round::RoundStatus;
use crate::domain::scoring::{calculate_score, RoundScore};
use crate::domain::state::GameState;
use crate::domain::leaderboard::update_player_score;

pub const NAMES: [&str; 8] = ["Anne", "Bob", "Cleo", "Dev", "Eli", "Fay", "Gus", "Hal"];

/// New game with `n` players named from `NAMES`.
pub fn game_with_players(n: usize) -> GameState {
    let mut game = GameState::new();
    for name in NAMES.iter().take(n) {
        game.add_player(*name);
    }
    game
}

pub fn player_ids(game: &GameState) -> Vec<PlayerId> {
    game.players().iter().map(|p| p.id()).collect()
}

/// Place `bids` (roster order) in the active round and run the flow.
pub fn bid_current_round(game: &mut GameState, bids: &[u8]) {
    let round_no = game.current_round_number();
    let ids = player_ids(game);
    let round = game.round_mut(round_no).expect("current round exists");
    for (id, bid) in ids.iter().zip(bids) {
        round.add_bid(*id, *bid).expect("bid accepted");
    }
    game.process_game_flow().expect("flow after bids");
    assert_eq!(
        game.round(round_no).map(|r| r.status()),
        Some(RoundStatus::Playing)
    );
}

/// Record `tricks` (roster order) for `round_no`, scoring with no bonus.
pub fn score_round(game: &mut GameState, round_no: u8, tricks: &[u8]) {
    let ids = player_ids(game);
    for (id, t) in ids.iter().zip(tricks) {
        let bid = game
            .round(round_no)
            .and_then(|r| r.bid_for(*id))
            .expect("bid present");
        let calc = calculate_score(bid as i32, *t as i32, round_no as i32).expect("valid score");
        let score = RoundScore::from_calculation(*id, *t, &calc);
        game.round_mut(round_no)
            .expect("round exists")
            .record_result(score)
            .expect("result recorded");
        update_player_score(game.player_mut(*id).expect("player exists"), score.total)
            .expect("total fits");
    }
}

/// Play every hand of the active round and run the flow after each.
pub fn play_out_current_round(game: &mut GameState) {
    let hands = game.current_round().expect("current round").required_hands();
    for _ in 0..hands {
        game.complete_hand_in_current_round().expect("hand completed");
        game.process_game_flow().expect("flow after hand");
    }
}

/// Bid, play and score the active round in one go.
pub fn finish_current_round(game: &mut GameState, bids: &[u8], tricks: &[u8]) {
    let round_no = game.current_round_number();
    bid_current_round(game, bids);
    play_out_current_round(game);
    score_round(game, round_no, tricks);
}
