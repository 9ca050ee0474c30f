//! Round scoring: bid vs tricks taken, with bonus points gated on an exact bid.

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::errors::domain::{DomainError, ValidationKind};

/// Score breakdown for one player in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCalculation {
    pub base_score: i32,
    pub bid_met: bool,
    pub bonus_eligible: bool,
    pub total_round_score: i32,
}

impl ScoreCalculation {
    /// Add bonus points; no-op unless the bid was met exactly.
    pub fn add_bonus_points(&mut self, bonus_points: i32) -> Result<(), DomainError> {
        if self.bonus_eligible {
            self.total_round_score = self
                .total_round_score
                .checked_add(bonus_points)
                .ok_or_else(|| score_overflow("bonus points"))?;
        }
        Ok(())
    }

    /// Bonus actually credited on top of the base score.
    pub fn applied_bonus(&self) -> i32 {
        self.total_round_score - self.base_score
    }
}

/// Pure scoring function.
///
/// - bid 0: `±10 × round_number` depending on whether zero tricks were taken
/// - bid n ≥ 1: `+20 × n` when exact, otherwise `-10 × |n - tricks|`
pub fn calculate_score(
    bid: i32,
    tricks_taken: i32,
    round_number: i32,
) -> Result<ScoreCalculation, DomainError> {
    if bid < 0 || tricks_taken < 0 {
        return Err(DomainError::validation(
            ValidationKind::NegativeValue,
            format!("bid ({bid}) and tricks taken ({tricks_taken}) must not be negative"),
        ));
    }
    if round_number < 1 {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoundNumber,
            format!("round number must be at least 1, got {round_number}"),
        ));
    }

    let bid_met = bid == tricks_taken;
    let base_score = match (bid, bid_met) {
        (0, true) => round_number.checked_mul(10),
        (0, false) => round_number.checked_mul(-10),
        (_, true) => bid.checked_mul(20),
        // both non-negative, so the difference cannot overflow
        (_, false) => (bid - tricks_taken).abs().checked_mul(-10),
    }
    .ok_or_else(|| score_overflow("base score"))?;

    Ok(ScoreCalculation {
        base_score,
        bid_met,
        bonus_eligible: bid_met,
        total_round_score: base_score,
    })
}

fn score_overflow(what: &str) -> DomainError {
    DomainError::validation_other(format!("{what} is too large to score"))
}

/// Score recorded on a round for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundScore {
    pub player_id: PlayerId,
    pub tricks_taken: u8,
    pub base: i32,
    pub bonus: i32,
    pub total: i32,
}

impl RoundScore {
    pub fn from_calculation(player_id: PlayerId, tricks_taken: u8, calc: &ScoreCalculation) -> Self {
        Self {
            player_id,
            tricks_taken,
            base: calc.base_score,
            bonus: calc.applied_bonus(),
            total: calc.total_round_score,
        }
    }
}
