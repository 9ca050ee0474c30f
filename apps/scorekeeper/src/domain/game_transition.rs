use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::domain::round::RoundStatus;
use crate::domain::state::GameState;

/// The parts of a game that lifecycle edges are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLifecycleView {
    pub round_no: u8,
    pub round_status: Option<RoundStatus>,
    pub is_complete: bool,
}

impl GameLifecycleView {
    pub fn of(game: &GameState) -> Self {
        Self {
            round_no: game.current_round_number(),
            round_status: game.current_round().map(|r| r.status()),
            is_complete: game.is_complete(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameTransition {
    /// Explicit: a player was added to the roster
    PlayerJoined { player_id: PlayerId },

    /// Edge-triggered: every bid is in and the round moved to playing
    BiddingClosed { round: u8 },

    /// Edge-triggered: the round's last hand was played
    RoundCompleted { round: u8 },

    /// Edge-triggered: a new round opened for bidding
    RoundStarted { round: u8 },

    /// Edge-triggered: round 10 finished
    GameEnded,
}

/// Derive lifecycle transitions from before/after views of one mutation.
pub fn derive_game_transitions(
    before: &GameLifecycleView,
    after: &GameLifecycleView,
) -> Vec<GameTransition> {
    let mut transitions = Vec::new();
    let round = before.round_no;

    // 1. Bidding closed (bidding -> playing/completed on the same round, or moved past it)
    let left_bidding = before.round_status == Some(RoundStatus::Bidding)
        && (after.round_no != round || after.round_status != Some(RoundStatus::Bidding));
    if left_bidding {
        transitions.push(GameTransition::BiddingClosed { round });
    }

    // 2. Round completed (moved to a later round, or finished the game)
    let finished_round = before.round_status != Some(RoundStatus::Completed)
        && (after.round_no > round
            || (after.round_no == round && after.round_status == Some(RoundStatus::Completed)));
    if finished_round {
        transitions.push(GameTransition::RoundCompleted { round });
    }

    // 3. Next round opened
    if after.round_no > round {
        transitions.push(GameTransition::RoundStarted {
            round: after.round_no,
        });
    }

    // 4. Game end (!complete -> complete)
    if !before.is_complete && after.is_complete {
        transitions.push(GameTransition::GameEnded);
    }

    transitions
}
