use std::ops::RangeInclusive;

pub const MAX_ROUNDS: u8 = 10;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
/// Upper bound on bonus points credited to one player in one round.
pub const MAX_BONUS_POINTS: i64 = 1_000;

/// Round `n` is played over `n` hands.
pub fn required_hands_for_round(round_no: u8) -> Option<u8> {
    if round_no == 0 || round_no > MAX_ROUNDS {
        return None;
    }
    Some(round_no)
}

pub fn valid_bid_range(hands_in_round: u8) -> RangeInclusive<u8> {
    0..=hands_in_round
}

pub fn is_valid_round_number(round_no: u8) -> bool {
    (1..=MAX_ROUNDS).contains(&round_no)
}
