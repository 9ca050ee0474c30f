//! Domain layer: pure round lifecycle and scoring logic.

pub mod bidding;
pub mod game_transition;
pub mod leaderboard;
pub mod player;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_props_bidding;
#[cfg(test)]
mod tests_round;
#[cfg(test)]
mod tests_snapshot;

// Re-exports for ergonomics
pub use bidding::{validate_bid, validate_round_bids, Bid, RoundBidsValidation};
pub use game_transition::{derive_game_transitions, GameLifecycleView, GameTransition};
pub use leaderboard::{get_leader, running_totals, scoreboard, update_player_score, ScoreboardEntry};
pub use player::{Player, PlayerId};
pub use round::{Round, RoundStatus};
pub use rules::{required_hands_for_round, MAX_BONUS_POINTS, MAX_PLAYERS, MAX_ROUNDS, MIN_PLAYERS};
pub use scoring::{calculate_score, RoundScore, ScoreCalculation};
pub use snapshot::{GamePhase, GameSnapshot, RoundRecord};
pub use state::{GameState, GameStatus};
