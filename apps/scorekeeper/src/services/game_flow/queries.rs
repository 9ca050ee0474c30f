use std::collections::BTreeMap;

use serde::Serialize;

use super::GameFlowService;
use crate::domain::bidding::validate_round_bids;
use crate::domain::leaderboard::{scoreboard, ScoreboardEntry};
use crate::domain::player::PlayerId;
use crate::domain::round::RoundStatus;
use crate::domain::state::{GameState, GameStatus};
use crate::errors::domain::{DomainError, StateKind, ValidationKind};

/// Detailed view of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetails {
    pub round_number: u8,
    pub status: RoundStatus,
    pub hands_required: u8,
    pub hands_completed: u8,
    pub is_round_complete: bool,
    pub is_game_complete: bool,
    pub bids: BTreeMap<PlayerId, u8>,
    pub total_bids: i64,
    pub tricks_recorded: u32,
}

impl GameFlowService {
    pub fn game_status(&self, game: &GameState) -> GameStatus {
        game.get_game_status()
    }

    pub fn scoreboard(&self, game: &GameState) -> Vec<ScoreboardEntry> {
        scoreboard(game.players())
    }

    /// Details for `round_no`, or for the active round when `None`.
    pub fn round_details(
        &self,
        game: &GameState,
        round_no: Option<u8>,
    ) -> Result<RoundDetails, DomainError> {
        let round = match round_no {
            Some(n) => game.round(n).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidRoundNumber,
                    format!("Round {n} does not exist"),
                )
            })?,
            None => game.current_round().ok_or_else(|| {
                DomainError::state(StateKind::NoActiveRound, "No current round available")
            })?,
        };

        let bids: Vec<(PlayerId, i64)> = round
            .bids()
            .iter()
            .map(|(p, b)| (*p, i64::from(*b)))
            .collect();
        let validation = validate_round_bids(&bids, round.required_hands());

        Ok(RoundDetails {
            round_number: round.number(),
            status: round.status(),
            hands_required: round.required_hands(),
            hands_completed: round.hands_completed(),
            is_round_complete: round.is_completed(),
            is_game_complete: game.is_complete(),
            bids: round.bids().clone(),
            total_bids: validation.total_bids,
            tricks_recorded: round.tricks_recorded(),
        })
    }
}
