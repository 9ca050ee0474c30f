//! Persisted-state shape and validated restore.
//!
//! The JSON form is `{players, rounds, currentRound, gamePhase}`. Restoring
//! re-checks every lifecycle invariant so a hand-edited or truncated file can
//! never produce a game the public API could not have reached.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::player::{Player, PlayerId};
use crate::domain::round::{Round, RoundStatus};
use crate::domain::rules::{MAX_PLAYERS, MAX_ROUNDS, MIN_PLAYERS};
use crate::domain::scoring::RoundScore;
use crate::domain::state::GameState;
use crate::errors::domain::DomainError;

/// Coarse phase of the whole game, as shown to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Fewer than the minimum number of players.
    Setup,
    Bidding,
    Playing,
    Finished,
}

impl GamePhase {
    pub fn of(game: &GameState) -> Self {
        if game.is_complete() {
            return GamePhase::Finished;
        }
        if game.players().len() < MIN_PLAYERS {
            return GamePhase::Setup;
        }
        match game.current_round().map(Round::status) {
            Some(RoundStatus::Bidding) | None => GamePhase::Bidding,
            Some(RoundStatus::Playing) | Some(RoundStatus::Completed) => GamePhase::Playing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub number: u8,
    pub status: RoundStatus,
    pub bids: BTreeMap<PlayerId, u8>,
    pub hands_completed: u8,
    /// Roster snapshot; empty means "the whole roster".
    #[serde(default)]
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub results: Vec<RoundScore>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub players: Vec<Player>,
    pub rounds: Vec<RoundRecord>,
    pub current_round: u8,
    pub game_phase: GamePhase,
}

impl From<&Round> for RoundRecord {
    fn from(round: &Round) -> Self {
        Self {
            number: round.number(),
            status: round.status(),
            bids: round.bids().clone(),
            hands_completed: round.hands_completed(),
            players: round.players().to_vec(),
            results: round.results().values().copied().collect(),
        }
    }
}

impl GameState {
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players().to_vec(),
            rounds: self.rounds().iter().map(RoundRecord::from).collect(),
            current_round: self.current_round_number(),
            game_phase: GamePhase::of(self),
        }
    }

    /// Restore a game from its persisted shape, rejecting inconsistent input
    /// with `DomainError::Integrity`.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, DomainError> {
        let GameSnapshot {
            players,
            rounds: records,
            current_round,
            game_phase,
        } = snapshot;

        check_roster(&players)?;
        let roster: Vec<PlayerId> = players.iter().map(Player::id).collect();

        if records.is_empty() || records.len() > MAX_ROUNDS as usize {
            return Err(DomainError::integrity(format!(
                "expected 1..={MAX_ROUNDS} rounds, found {}",
                records.len()
            )));
        }

        let last_index = records.len() - 1;
        let mut rounds = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let expected_no = idx as u8 + 1;
            if record.number != expected_no {
                return Err(DomainError::integrity(format!(
                    "round {} found where round {expected_no} was expected",
                    record.number
                )));
            }
            if idx < last_index && record.status != RoundStatus::Completed {
                return Err(DomainError::integrity(format!(
                    "round {} is {} but a later round exists",
                    record.number, record.status
                )));
            }
            rounds.push(restore_round(record, &roster)?);
        }

        let last_no = rounds[last_index].number();
        if current_round != last_no {
            return Err(DomainError::integrity(format!(
                "current round {current_round} does not match last round {last_no}"
            )));
        }

        let last = &rounds[last_index];
        if last.is_completed() && last_no != MAX_ROUNDS {
            return Err(DomainError::integrity(format!(
                "round {last_no} is completed but round {} was never opened",
                last_no + 1
            )));
        }
        if last.status() == RoundStatus::Bidding && last.all_bids_complete() {
            return Err(DomainError::integrity(format!(
                "round {last_no} has every bid but is still bidding"
            )));
        }

        check_round_scores(&players, &rounds)?;

        let finished = game_phase == GamePhase::Finished;
        if finished && !(last_no == MAX_ROUNDS && rounds[last_index].is_completed()) {
            return Err(DomainError::integrity(format!(
                "game marked finished but round {last_no} is {}",
                rounds[last_index].status()
            )));
        }
        let game = GameState::from_parts(players, rounds, current_round, finished)?;
        let derived = GamePhase::of(&game);
        if derived != game_phase {
            return Err(DomainError::integrity(format!(
                "stored game phase {game_phase:?} does not match derived phase {derived:?}"
            )));
        }
        Ok(game)
    }
}

fn check_roster(players: &[Player]) -> Result<(), DomainError> {
    if players.len() > MAX_PLAYERS {
        return Err(DomainError::integrity(format!(
            "{} players stored, at most {MAX_PLAYERS} allowed",
            players.len()
        )));
    }
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for p in players {
        if !ids.insert(p.id()) {
            return Err(DomainError::integrity(format!("duplicate player id {}", p.id())));
        }
        if !names.insert(p.name().to_lowercase()) {
            return Err(DomainError::integrity(format!(
                "duplicate player name '{}'",
                p.name()
            )));
        }
    }
    Ok(())
}

fn restore_round(record: RoundRecord, roster: &[PlayerId]) -> Result<Round, DomainError> {
    let number = record.number;
    let players = if record.players.is_empty() {
        roster.to_vec()
    } else {
        record.players
    };
    if let Some(stranger) = players.iter().find(|p| !roster.contains(p)) {
        return Err(DomainError::integrity(format!(
            "round {number} lists unknown player {stranger}"
        )));
    }

    let mut results = BTreeMap::new();
    for score in record.results {
        if results.insert(score.player_id, score).is_some() {
            return Err(DomainError::integrity(format!(
                "round {number} scores player {} twice",
                score.player_id
            )));
        }
    }

    let round = Round::from_parts(
        number,
        record.status,
        players,
        record.bids,
        record.hands_completed,
        results,
    )
    .map_err(|e| DomainError::integrity(e.detail()))?;

    let hands_ok = match round.status() {
        RoundStatus::Bidding => round.hands_completed() == 0,
        RoundStatus::Playing => round.hands_completed() < round.required_hands(),
        RoundStatus::Completed => round.hands_completed() == round.required_hands(),
    };
    if !hands_ok {
        return Err(DomainError::integrity(format!(
            "round {number} is {} with {} of {} hands completed",
            round.status(),
            round.hands_completed(),
            round.required_hands()
        )));
    }

    for (player_id, bid) in round.bids() {
        if !round.has_player(*player_id) {
            return Err(DomainError::integrity(format!(
                "round {number} has a bid from non-roster player {player_id}"
            )));
        }
        if *bid > round.required_hands() {
            return Err(DomainError::integrity(format!(
                "round {number} bid {bid} exceeds {} hands",
                round.required_hands()
            )));
        }
    }

    if round.status() != RoundStatus::Bidding && !round.all_bids_complete() {
        return Err(DomainError::integrity(format!(
            "round {number} is {} but bidding never finished",
            round.status()
        )));
    }
    if round.status() == RoundStatus::Bidding && !round.results().is_empty() {
        return Err(DomainError::integrity(format!(
            "round {number} has scores while still bidding"
        )));
    }
    for score in round.results().values() {
        if round.bid_for(score.player_id).is_none() {
            return Err(DomainError::integrity(format!(
                "round {number} scores player {} without a bid",
                score.player_id
            )));
        }
        if score.tricks_taken > round.required_hands()
            || score.base.checked_add(score.bonus) != Some(score.total) {
            return Err(DomainError::integrity(format!(
                "round {number} has an inconsistent score for player {}",
                score.player_id
            )));
        }
    }

    Ok(round)
}

/// Each player's history must be exactly their recorded round totals, in round order.
fn check_round_scores(players: &[Player], rounds: &[Round]) -> Result<(), DomainError> {
    for p in players {
        let expected: Vec<i32> = rounds
            .iter()
            .filter_map(|r| r.results().get(&p.id()).map(|s| s.total))
            .collect();
        if expected != p.round_scores() {
            return Err(DomainError::integrity(format!(
                "player {} round scores {:?} do not match recorded round results {:?}",
                p.id(),
                p.round_scores(),
                expected
            )));
        }
    }
    Ok(())
}
