//! Player roster entries and setup validation.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::rules::MAX_PLAYERS;
use crate::errors::domain::{DomainError, ValidationKind};

/// Stable player identifier, assigned sequentially per game starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A seated player and their score history.
///
/// `total_score` always equals the sum of `round_scores`; the fields are only
/// mutated through [`crate::domain::leaderboard::update_player_score`], and a
/// deserialized player that breaks the rule is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PlayerRecord", rename_all = "camelCase")]
pub struct Player {
    id: PlayerId,
    name: String,
    total_score: i32,
    round_scores: Vec<i32>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
            round_scores: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_score(&self) -> i32 {
        self.total_score
    }

    pub fn round_scores(&self) -> &[i32] {
        &self.round_scores
    }

    pub(crate) fn record_round_score(&mut self, round_score: i32) -> Result<(), DomainError> {
        let total = self.total_score.checked_add(round_score).ok_or_else(|| {
            DomainError::validation_other(format!(
                "player {} total score would overflow",
                self.id
            ))
        })?;
        self.round_scores.push(round_score);
        self.total_score = total;
        Ok(())
    }

    /// Test hook for exercising the integrity check.
    #[cfg(test)]
    pub(crate) fn force_total_score(&mut self, total: i32) {
        self.total_score = total;
    }
}

/// Wire shape of a player; converted into [`Player`] only if consistent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerRecord {
    id: PlayerId,
    name: String,
    total_score: i32,
    #[serde(default)]
    round_scores: Vec<i32>,
}

impl TryFrom<PlayerRecord> for Player {
    type Error = DomainError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let name = normalize_player_name(&record.name)?;
        let sum = history_total(&record.round_scores).ok_or_else(|| {
            DomainError::integrity(format!(
                "player {} round scores overflow the total",
                record.id
            ))
        })?;
        if sum != record.total_score {
            return Err(DomainError::integrity(format!(
                "player {} total score {} does not match round scores sum {sum}",
                record.id, record.total_score
            )));
        }
        Ok(Self {
            id: record.id,
            name,
            total_score: record.total_score,
            round_scores: record.round_scores,
        })
    }
}

/// Sum of a score history, `None` if any running total leaves `i32`.
pub(crate) fn history_total(round_scores: &[i32]) -> Option<i32> {
    round_scores
        .iter()
        .try_fold(0i32, |acc, score| acc.checked_add(*score))
}

/// Trim a raw player name; blank names are rejected.
pub fn normalize_player_name(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyName,
            "Player name cannot be empty",
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a name for a new roster entry against the existing roster.
///
/// Returns the trimmed name. Uniqueness is case-insensitive.
pub fn validate_new_player(existing: &[Player], raw_name: &str) -> Result<String, DomainError> {
    let name = normalize_player_name(raw_name)?;

    let lowered = name.to_lowercase();
    if existing.iter().any(|p| p.name.to_lowercase() == lowered) {
        return Err(DomainError::validation(
            ValidationKind::DuplicateName,
            format!("Player name '{name}' must be unique"),
        ));
    }

    if existing.len() >= MAX_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::TooManyPlayers,
            format!("Maximum of {MAX_PLAYERS} players allowed"),
        ));
    }

    Ok(name)
}
