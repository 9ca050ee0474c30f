//! Property tests for bid validation.
//!
//! Contract:
//! - A bid is legal iff it lies in `0..=hands_in_round`
//! - Round bids are validated one by one; their sum is never constrained

use proptest::prelude::*;

use crate::domain::bidding::{validate_bid, validate_round_bids};
use crate::domain::player::PlayerId;
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::errors::domain::{DomainError, ValidationKind};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: every in-range bid is accepted unchanged
    #[test]
    fn prop_in_range_bids_accepted((round, bid) in test_gens::round_and_valid_bid()) {
        prop_assert_eq!(validate_bid(bid as i64, round).unwrap(), bid);
    }

    /// Property: anything outside 0..=hands is an InvalidBid
    #[test]
    fn prop_out_of_range_bids_rejected(
        round in test_gens::round_no(),
        excess in 1i64..1_000,
        negate in any::<bool>(),
    ) {
        let bid = if negate { -excess } else { round as i64 + excess };
        let err = validate_bid(bid, round).unwrap_err();
        prop_assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidBid, _)));
    }

    /// Property: validity of the whole round is the conjunction of each bid
    #[test]
    fn prop_round_bids_valid_iff_each_bid_valid(
        round in test_gens::round_no(),
        raw in prop::collection::vec(-3i64..=13, 2..=8),
    ) {
        let bids: Vec<(PlayerId, i64)> = raw
            .iter()
            .enumerate()
            .map(|(i, b)| (PlayerId(i as u32 + 1), *b))
            .collect();
        let result = validate_round_bids(&bids, round);

        let expected_invalid = raw.iter().filter(|b| validate_bid(**b, round).is_err()).count();
        prop_assert_eq!(result.errors.len(), expected_invalid);
        prop_assert_eq!(result.valid, expected_invalid == 0);
        prop_assert_eq!(result.total_bids, raw.iter().sum::<i64>());
    }
}
