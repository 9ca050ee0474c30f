use serde::Serialize;
use tracing::{debug, info, warn};

use super::{GameFlowOutcome, GameFlowService};
use crate::config::TricksSumPolicy;
use crate::domain::bidding::validate_bid;
use crate::domain::game_transition::GameTransition;
use crate::domain::leaderboard::update_player_score;
use crate::domain::player::{validate_new_player, Player, PlayerId};
use crate::domain::round::RoundStatus;
use crate::domain::rules::MAX_BONUS_POINTS;
use crate::domain::scoring::{calculate_score, RoundScore, ScoreCalculation};
use crate::domain::state::GameState;
use crate::errors::domain::{DomainError, StateKind, ValidationKind};

/// Recorded tricks for a round that do not add up to its hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TricksMismatch {
    pub round: u8,
    pub required_hands: u8,
    pub tricks_recorded: u32,
}

/// What `submit_tricks_taken` recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TricksOutcome {
    pub calculation: ScoreCalculation,
    pub recorded: RoundScore,
    /// Set under `TricksSumPolicy::Warn` when the totals are off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<TricksMismatch>,
}

impl GameFlowService {
    /// Add a player to the roster.
    ///
    /// The roster is locked once any bid has been accepted.
    pub fn add_player(
        &self,
        game: &mut GameState,
        name: &str,
    ) -> Result<GameFlowOutcome<Player>, DomainError> {
        if game.has_bids() {
            return Err(DomainError::state(
                StateKind::RosterLocked,
                "Players cannot be added once bidding has started",
            ));
        }
        let name = validate_new_player(game.players(), name)?;

        let outcome = self.run_mutation(game, |g| {
            let player = g.add_player(name).clone();
            let joined = GameTransition::PlayerJoined {
                player_id: player.id(),
            };
            Ok((player, vec![joined]))
        })?;

        info!(
            player_id = %outcome.value.id(),
            players = game.players().len(),
            "Player added"
        );
        Ok(outcome)
    }

    /// Submit a bid for the active round.
    pub fn submit_bid(
        &self,
        game: &mut GameState,
        round_no: u8,
        player_id: PlayerId,
        bid: i64,
    ) -> Result<GameFlowOutcome<()>, DomainError> {
        debug!(round = round_no, %player_id, bid, "Submitting bid");

        if game.is_complete() {
            return Err(DomainError::state(
                StateKind::GameComplete,
                "Game is already complete",
            ));
        }
        let round = game.round(round_no).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRoundNumber,
                format!("Round {round_no} does not exist"),
            )
        })?;
        if round_no != game.current_round_number() || round.status() != RoundStatus::Bidding {
            return Err(DomainError::state(
                StateKind::WrongPhase,
                format!(
                    "Round {round_no} is {} and not accepting bids",
                    round.status()
                ),
            ));
        }
        if !game.has_minimum_players() {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                "At least 2 players are needed before bidding",
            ));
        }
        if !round.has_player(player_id) {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("Player {player_id} is not in round {round_no}"),
            ));
        }
        let bid = validate_bid(bid, round.required_hands())?;

        let outcome = self.run_mutation(game, |g| {
            let round = g.round_mut(round_no).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidRoundNumber,
                    format!("Round {round_no} does not exist"),
                )
            })?;
            round.add_bid(player_id, bid)?;
            Ok(((), Vec::new()))
        })?;

        info!(round = round_no, %player_id, bid, "Bid accepted");
        Ok(outcome)
    }

    /// Record tricks taken (and bonus points) for a player, score the round for
    /// them and add it to their total.
    pub fn submit_tricks_taken(
        &self,
        game: &mut GameState,
        round_no: u8,
        player_id: PlayerId,
        tricks_taken: i64,
        bonus_points: i64,
    ) -> Result<GameFlowOutcome<TricksOutcome>, DomainError> {
        debug!(
            round = round_no,
            %player_id,
            tricks_taken,
            bonus_points,
            "Submitting tricks"
        );

        let round = game.round(round_no).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidRoundNumber,
                format!("Round {round_no} does not exist"),
            )
        })?;
        if !round.has_player(player_id) {
            return Err(DomainError::validation(
                ValidationKind::UnknownPlayer,
                format!("Player {player_id} is not in round {round_no}"),
            ));
        }
        round.check_result_allowed(player_id)?;

        if tricks_taken < 0 {
            return Err(DomainError::validation(
                ValidationKind::NegativeValue,
                "Tricks taken cannot be negative",
            ));
        }
        let required = round.required_hands();
        let tricks = match u8::try_from(tricks_taken) {
            Ok(t) if t <= required => t,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::TricksOutOfRange,
                    format!("Tricks taken cannot exceed {required} hands"),
                ))
            }
        };
        if bonus_points < 0 {
            return Err(DomainError::validation(
                ValidationKind::NegativeValue,
                "Bonus points cannot be negative",
            ));
        }
        let bonus = match i32::try_from(bonus_points) {
            Ok(b) if bonus_points <= MAX_BONUS_POINTS => b,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::BonusOutOfRange,
                    format!("Bonus points cannot exceed {MAX_BONUS_POINTS}"),
                ))
            }
        };
        let bid = round.bid_for(player_id).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::MissingBid,
                format!("Player {player_id} has no bid in round {round_no}"),
            )
        })?;

        if let Some(earlier) = game
            .rounds()
            .iter()
            .filter(|r| r.number() < round_no)
            .find(|r| !r.results().contains_key(&player_id))
        {
            return Err(DomainError::state(
                StateKind::EarlierRoundUnscored,
                format!(
                    "Player {player_id} must be scored for round {} first",
                    earlier.number()
                ),
            ));
        }

        let mut calculation = calculate_score(bid as i32, tricks as i32, round_no as i32)?;
        calculation.add_bonus_points(bonus)?;

        let tricks_recorded = round.tricks_recorded() + tricks as u32;
        let last_entry = round.results().len() + 1 == round.players().len();
        let mismatch = (tricks_recorded > required as u32
            || (last_entry && tricks_recorded != required as u32))
            .then_some(TricksMismatch {
                round: round_no,
                required_hands: required,
                tricks_recorded,
            });

        if let Some(m) = mismatch {
            match self.config().tricks_sum_policy {
                TricksSumPolicy::Enforce => {
                    return Err(DomainError::validation(
                        ValidationKind::TricksSumMismatch,
                        format!(
                            "Tricks recorded for round {} would total {} but the round has {} hands",
                            m.round, m.tricks_recorded, m.required_hands
                        ),
                    ));
                }
                TricksSumPolicy::Warn => {
                    warn!(
                        round = m.round,
                        required_hands = m.required_hands,
                        tricks_recorded = m.tricks_recorded,
                        "Tricks recorded do not match hands in round"
                    );
                }
            }
        }

        let recorded = RoundScore::from_calculation(player_id, tricks, &calculation);
        let outcome = self.run_mutation(game, |g| {
            let round = g.round_mut(round_no).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidRoundNumber,
                    format!("Round {round_no} does not exist"),
                )
            })?;
            round.record_result(recorded)?;

            let player = g.player_mut(player_id).ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::UnknownPlayer,
                    format!("Player {player_id} is not on the roster"),
                )
            })?;
            update_player_score(player, recorded.total)?;

            Ok((
                TricksOutcome {
                    calculation,
                    recorded,
                    mismatch,
                },
                Vec::new(),
            ))
        })?;

        info!(
            round = round_no,
            %player_id,
            base = recorded.base,
            bonus = recorded.bonus,
            total = recorded.total,
            "Round score recorded"
        );
        Ok(outcome)
    }

    /// Count one played hand in the active round.
    pub fn complete_hand(
        &self,
        game: &mut GameState,
    ) -> Result<GameFlowOutcome<RoundStatus>, DomainError> {
        let outcome = self.run_mutation(game, |g| {
            let status = g.complete_hand_in_current_round()?;
            Ok((status, Vec::new()))
        })?;

        for t in &outcome.transitions {
            info!(transition = ?t, "Game transition");
        }
        Ok(outcome)
    }
}
