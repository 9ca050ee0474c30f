//! Per-round state machine: `bidding -> playing -> completed`.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::domain::rules::required_hands_for_round;
use crate::domain::scoring::RoundScore;
use crate::errors::domain::{DomainError, StateKind, ValidationKind};

/// Round phases. Ordering follows the lifecycle; status never moves backwards.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// Players commit their bids.
    Bidding,
    /// Hands are being played; `hands_completed < required_hands`.
    Playing,
    /// All hands played.
    Completed,
}

impl RoundStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Bidding => "bidding",
            RoundStatus::Playing => "playing",
            RoundStatus::Completed => "completed",
        }
    }
}

impl Display for RoundStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    number: u8,
    required_hands: u8,
    status: RoundStatus,
    /// Roster snapshot, in canonical order.
    players: Vec<PlayerId>,
    /// Last write wins per player.
    bids: BTreeMap<PlayerId, u8>,
    hands_completed: u8,
    results: BTreeMap<PlayerId, RoundScore>,
}

impl Round {
    /// Create round `number` in the bidding phase.
    pub fn new(number: u8, players: Vec<PlayerId>) -> Result<Self, DomainError> {
        let required_hands = required_hands_for_round(number).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRoundNumber,
                format!("Round {number} is outside 1..=10"),
            )
        })?;
        Ok(Self {
            number,
            required_hands,
            status: RoundStatus::Bidding,
            players,
            bids: BTreeMap::new(),
            hands_completed: 0,
            results: BTreeMap::new(),
        })
    }

    /// Rebuild a round from persisted parts. Consistency is checked by the caller.
    pub(crate) fn from_parts(
        number: u8,
        status: RoundStatus,
        players: Vec<PlayerId>,
        bids: BTreeMap<PlayerId, u8>,
        hands_completed: u8,
        results: BTreeMap<PlayerId, RoundScore>,
    ) -> Result<Self, DomainError> {
        let mut round = Self::new(number, players)?;
        round.status = status;
        round.bids = bids;
        round.hands_completed = hands_completed;
        round.results = results;
        Ok(round)
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn required_hands(&self) -> u8 {
        self.required_hands
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn bids(&self) -> &BTreeMap<PlayerId, u8> {
        &self.bids
    }

    pub fn bid_for(&self, player_id: PlayerId) -> Option<u8> {
        self.bids.get(&player_id).copied()
    }

    pub fn hands_completed(&self) -> u8 {
        self.hands_completed
    }

    pub fn results(&self) -> &BTreeMap<PlayerId, RoundScore> {
        &self.results
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.players.contains(&player_id)
    }

    pub(crate) fn set_players(&mut self, players: Vec<PlayerId>) {
        self.players = players;
    }

    /// Record a bid. Range is the caller's job (see `bidding::validate_bid`).
    pub fn add_bid(&mut self, player_id: PlayerId, bid: u8) -> Result<(), DomainError> {
        if self.status != RoundStatus::Bidding {
            return Err(DomainError::state(
                StateKind::WrongPhase,
                format!("Cannot add bid when status is {}", self.status),
            ));
        }
        self.bids.insert(player_id, bid);
        Ok(())
    }

    /// Every rostered player has a bid. An empty roster is never complete.
    pub fn all_bids_complete(&self) -> bool {
        !self.players.is_empty()
            && self.bids.len() == self.players.len()
            && self.players.iter().all(|p| self.bids.contains_key(p))
    }

    pub fn start_playing(&mut self) -> Result<(), DomainError> {
        if self.status != RoundStatus::Bidding {
            return Err(DomainError::state(
                StateKind::WrongPhase,
                format!("Cannot start playing from {} status", self.status),
            ));
        }
        self.status = RoundStatus::Playing;
        Ok(())
    }

    /// Count one played hand; the last one completes the round.
    pub fn complete_hand(&mut self) -> Result<RoundStatus, DomainError> {
        if self.status != RoundStatus::Playing {
            return Err(DomainError::state(
                StateKind::WrongPhase,
                format!("Cannot complete hand when status is {}", self.status),
            ));
        }
        self.hands_completed += 1;
        if self.hands_completed == self.required_hands {
            self.status = RoundStatus::Completed;
        }
        Ok(self.status)
    }

    pub fn is_completed(&self) -> bool {
        self.status == RoundStatus::Completed && self.hands_completed == self.required_hands
    }

    /// Store a player's score for this round. Each player is scored once.
    pub fn record_result(&mut self, score: RoundScore) -> Result<(), DomainError> {
        self.check_result_allowed(score.player_id)?;
        self.results.insert(score.player_id, score);
        Ok(())
    }

    /// Whether a result for `player_id` could be recorded right now.
    pub fn check_result_allowed(&self, player_id: PlayerId) -> Result<(), DomainError> {
        if self.status == RoundStatus::Bidding {
            return Err(DomainError::state(
                StateKind::WrongPhase,
                format!(
                    "Cannot record tricks for round {} while bidding",
                    self.number
                ),
            ));
        }
        if self.results.contains_key(&player_id) {
            return Err(DomainError::state(
                StateKind::AlreadyScored,
                format!(
                    "Player {player_id} already scored for round {}",
                    self.number
                ),
            ));
        }
        Ok(())
    }

    /// Sum of tricks recorded so far.
    pub fn tricks_recorded(&self) -> u32 {
        self.results.values().map(|r| r.tricks_taken as u32).sum()
    }

    pub fn all_results_recorded(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| self.results.contains_key(p))
    }

    pub fn total_bids(&self) -> u32 {
        self.bids.values().map(|b| *b as u32).sum()
    }
}
