//! Game flow service - the operations collaborators call into.
//!
//! Every mutating method validates, applies the change, then re-runs
//! `GameState::process_game_flow` so phase transitions happen in the same call.

mod mutation;
mod player_actions;
mod queries;

use crate::config::GameConfig;

pub use mutation::GameFlowOutcome;
pub use player_actions::{TricksMismatch, TricksOutcome};
pub use queries::RoundDetails;

/// Stateless apart from its rule configuration; the caller owns the game.
#[derive(Debug, Default, Clone)]
pub struct GameFlowService {
    config: GameConfig,
}

impl GameFlowService {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
