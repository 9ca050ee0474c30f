//! Score aggregation across rounds: totals, leader and scoreboard rows.

use serde::Serialize;

use crate::domain::player::{history_total, Player, PlayerId};
use crate::errors::domain::DomainError;

/// Append a finalized round score and add it to the total.
///
/// Fails without touching the player if the total would leave `i32`.
pub fn update_player_score(player: &mut Player, round_score: i32) -> Result<(), DomainError> {
    player.record_round_score(round_score)
}

/// Highest total wins; ties go to the earliest player in roster order.
pub fn get_leader(players: &[Player]) -> Option<&Player> {
    players.iter().fold(None, |leader: Option<&Player>, current| match leader {
        Some(l) if current.total_score() <= l.total_score() => Some(l),
        _ => Some(current),
    })
}

/// Prefix sums of the player's round scores. Every prefix fits in `i32`
/// because histories are only built through checked additions.
pub fn running_totals(player: &Player) -> Vec<i32> {
    player
        .round_scores()
        .iter()
        .scan(0, |acc, score| {
            *acc += score;
            Some(*acc)
        })
        .collect()
}

/// Check `total_score == sum(round_scores)` for every player.
pub fn validate_score_integrity(players: &[Player]) -> Result<(), DomainError> {
    for p in players {
        match history_total(p.round_scores()) {
            Some(sum) if sum == p.total_score() => {}
            Some(sum) => {
                return Err(DomainError::integrity(format!(
                    "player {} total score {} does not match round scores sum {sum}",
                    p.id(),
                    p.total_score()
                )))
            }
            None => {
                return Err(DomainError::integrity(format!(
                    "player {} round scores overflow the total",
                    p.id()
                )))
            }
        }
    }
    Ok(())
}

/// One scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub total_score: i32,
    pub is_leader: bool,
    pub round_scores: Vec<i32>,
    pub running_totals: Vec<i32>,
}

/// Players sorted by total, descending.
///
/// `sort_by` is stable, so equal totals keep roster order and the leader row
/// (first maximum in roster order) is always the first row.
pub fn scoreboard(players: &[Player]) -> Vec<ScoreboardEntry> {
    let leader_id = get_leader(players).map(Player::id);

    let mut rows: Vec<ScoreboardEntry> = players
        .iter()
        .map(|p| ScoreboardEntry {
            player_id: p.id(),
            name: p.name().to_string(),
            total_score: p.total_score(),
            is_leader: Some(p.id()) == leader_id,
            round_scores: p.round_scores().to_vec(),
            running_totals: running_totals(p),
        })
        .collect();

    rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    rows
}
