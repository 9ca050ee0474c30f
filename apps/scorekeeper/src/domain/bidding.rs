use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::domain::rules::valid_bid_range;
use crate::errors::domain::{DomainError, ValidationKind};

/// A validated bid for one player.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub player_id: PlayerId,
    pub bid: u8,
}

impl Bid {
    /// Build a bid, rejecting values outside `0..=hands_in_round`.
    pub fn new(player_id: PlayerId, bid: i64, hands_in_round: u8) -> Result<Self, DomainError> {
        let bid = validate_bid(bid, hands_in_round)?;
        Ok(Self { player_id, bid })
    }
}

/// Outcome of validating every bid submitted for a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundBidsValidation {
    pub valid: bool,
    pub errors: Vec<String>,
    pub total_bids: i64,
}

/// Parse user input as a whole number.
pub fn parse_whole_number(raw: &str) -> Result<i64, DomainError> {
    raw.trim().parse::<i64>().map_err(|_| {
        DomainError::validation(
            ValidationKind::NotInteger,
            format!("'{}' must be a whole number", raw.trim()),
        )
    })
}

/// Validate a single bid against the number of hands in the round.
///
/// Returns the bid narrowed to `u8` on success.
pub fn validate_bid(bid: i64, hands_in_round: u8) -> Result<u8, DomainError> {
    if bid < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            "Bid cannot be negative",
        ));
    }
    let range = valid_bid_range(hands_in_round);
    match u8::try_from(bid) {
        Ok(b) if range.contains(&b) => Ok(b),
        _ => Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid cannot exceed {hands_in_round} hands"),
        )),
    }
}

/// Validate all bids for a round.
///
/// Collects one message per invalid bid. The sum of bids is reported but not
/// checked against the hand count.
pub fn validate_round_bids(bids: &[(PlayerId, i64)], hands_in_round: u8) -> RoundBidsValidation {
    let errors: Vec<String> = bids
        .iter()
        .filter_map(|(player_id, bid)| {
            validate_bid(*bid, hands_in_round)
                .err()
                .map(|e| format!("Player {player_id}: {}", e.detail()))
        })
        .collect();

    RoundBidsValidation {
        valid: errors.is_empty(),
        errors,
        total_bids: bids.iter().map(|(_, b)| *b).sum(),
    }
}
