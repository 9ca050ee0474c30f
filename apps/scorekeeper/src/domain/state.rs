use serde::Serialize;

use crate::domain::player::{Player, PlayerId};
use crate::domain::round::{Round, RoundStatus};
use crate::domain::rules::{is_valid_round_number, MAX_ROUNDS, MIN_PLAYERS};
use crate::errors::domain::{DomainError, StateKind};

/// Read-only summary of where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub current_round: u8,
    pub is_complete: bool,
    pub current_round_status: Option<RoundStatus>,
    pub total_rounds: usize,
}

/// One game: the roster plus the rounds created so far.
///
/// Rounds are created lazily, one at a time, and kept as history once
/// completed. `current_round_number` stays within `1..=10`; finishing round 10
/// marks the game complete instead of creating round 11.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    players: Vec<Player>,
    rounds: Vec<Round>,
    current_round_number: u8,
    is_complete: bool,
    next_player_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// New game with round 1 open for bidding and an empty roster.
    pub fn new() -> Self {
        let mut game = Self {
            players: Vec::new(),
            rounds: Vec::new(),
            current_round_number: 1,
            is_complete: false,
            next_player_id: 1,
        };
        game.create_new_round();
        game
    }

    /// Rebuild from already-validated parts (see `snapshot`).
    ///
    /// Fails when no id is left for the next player.
    pub(crate) fn from_parts(
        players: Vec<Player>,
        rounds: Vec<Round>,
        current_round_number: u8,
        is_complete: bool,
    ) -> Result<Self, DomainError> {
        let highest = players.iter().map(|p| p.id().0).max().unwrap_or(0);
        let next_player_id = highest.checked_add(1).ok_or_else(|| {
            DomainError::integrity(format!("player id {highest} leaves no room for new players"))
        })?;
        Ok(Self {
            players,
            rounds,
            current_round_number,
            is_complete,
            next_player_id,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub(crate) fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == player_id)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round(&self, number: u8) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number() == number)
    }

    pub(crate) fn round_mut(&mut self, number: u8) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.number() == number)
    }

    pub fn current_round_number(&self) -> u8 {
        self.current_round_number
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    fn current_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    pub fn has_minimum_players(&self) -> bool {
        self.players.len() >= MIN_PLAYERS
    }

    /// True once any bid has been recorded in any round.
    pub fn has_bids(&self) -> bool {
        self.rounds.iter().any(|r| !r.bids().is_empty())
    }

    /// Finished once round 10 is completed, even before `process_game_flow` runs.
    pub fn is_complete(&self) -> bool {
        self.is_complete
            || (self.current_round_number == MAX_ROUNDS
                && self.current_round().is_some_and(Round::is_completed))
    }

    /// Append a player and refresh the active round's roster snapshot.
    ///
    /// Name rules and roster bounds are enforced by the caller
    /// (`player::validate_new_player`).
    pub fn add_player(&mut self, name: impl Into<String>) -> &Player {
        let id = PlayerId(self.next_player_id);
        self.next_player_id += 1;
        self.players.push(Player::new(id, name));

        let roster: Vec<PlayerId> = self.players.iter().map(Player::id).collect();
        if let Some(round) = self.current_round_mut() {
            round.set_players(roster);
        }
        &self.players[self.players.len() - 1]
    }

    /// Create the round for `current_round_number`.
    ///
    /// Past round 10 the game is marked complete and nothing is created. An
    /// existing round for the same number is returned as-is, never recreated.
    pub fn create_new_round(&mut self) -> Option<&Round> {
        if self.current_round_number > MAX_ROUNDS {
            self.is_complete = true;
            return None;
        }
        if self.round(self.current_round_number).is_some() {
            return self.current_round();
        }

        let roster: Vec<PlayerId> = self.players.iter().map(Player::id).collect();
        match Round::new(self.current_round_number, roster) {
            Ok(round) => {
                self.rounds.push(round);
                self.current_round()
            }
            Err(_) => {
                self.is_complete = true;
                None
            }
        }
    }

    /// Move to the next round. The current round must be completed.
    ///
    /// Returns the newly created round, or `None` when round 10 just finished
    /// and the game is now complete.
    pub fn advance_to_next_round(&mut self) -> Result<Option<&Round>, DomainError> {
        let current = self.current_round().ok_or_else(|| {
            DomainError::state(StateKind::NoActiveRound, "No current round available")
        })?;
        if !current.is_completed() {
            return Err(DomainError::state(
                StateKind::RoundNotCompleted,
                "Cannot advance: current round is not completed",
            ));
        }
        if !is_valid_round_number(self.current_round_number) {
            return Err(DomainError::state(
                StateKind::RoundOutOfRange,
                format!(
                    "Invalid round progression from round {}",
                    self.current_round_number
                ),
            ));
        }
        if self.is_complete {
            return Err(DomainError::state(
                StateKind::GameComplete,
                "Game is already complete",
            ));
        }

        if self.current_round_number == MAX_ROUNDS {
            self.is_complete = true;
            return Ok(None);
        }

        self.current_round_number += 1;
        Ok(self.create_new_round())
    }

    /// Move the active round from bidding to playing.
    pub fn start_current_round_playing(&mut self) -> Result<(), DomainError> {
        let round = self.current_round_mut().ok_or_else(|| {
            DomainError::state(StateKind::NoActiveRound, "No current round available")
        })?;
        round.start_playing()
    }

    /// Count a played hand in the active round.
    pub fn complete_hand_in_current_round(&mut self) -> Result<RoundStatus, DomainError> {
        if self.is_complete() {
            return Err(DomainError::state(
                StateKind::GameComplete,
                "Game is already complete",
            ));
        }
        let round = self.current_round_mut().ok_or_else(|| {
            DomainError::state(StateKind::NoActiveRound, "No current round available")
        })?;
        round.complete_hand()
    }

    /// Re-evaluate automatic transitions after a mutation.
    ///
    /// - bidding with every bid in: start playing
    /// - completed round: advance (or finish the game after round 10)
    pub fn process_game_flow(&mut self) -> Result<(), DomainError> {
        let Some(round) = self.current_round() else {
            return Ok(());
        };

        if round.status() == RoundStatus::Bidding && round.all_bids_complete() {
            self.start_current_round_playing()?;
        }

        let completed = self.current_round().is_some_and(Round::is_completed);
        if completed && !self.is_complete {
            self.advance_to_next_round()?;
        }
        Ok(())
    }

    pub fn get_game_status(&self) -> GameStatus {
        GameStatus {
            current_round: self.current_round_number,
            is_complete: self.is_complete(),
            current_round_status: self.current_round().map(Round::status),
            total_rounds: self.rounds.len(),
        }
    }

    #[cfg(test)]
    pub(crate) fn force_current_round_number(&mut self, round_no: u8) {
        self.current_round_number = round_no;
    }
}
