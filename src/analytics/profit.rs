use crate::models::BetResult;
use rust_decimal::Decimal;

/// Signed profit of a wager for a given result.
///
/// A win pays `stake * (odds - 1)`, a loss forfeits the stake, and a push
/// or an unsettled bet contributes nothing. Stored records are not bounded,
/// so the win amount saturates at the Decimal range instead of overflowing.
pub fn profit(stake: Decimal, odds: Decimal, result: BetResult) -> Decimal {
    match result {
        BetResult::Win => stake.saturating_mul(odds.saturating_sub(Decimal::ONE)),
        BetResult::Loss => -stake,
        BetResult::Push | BetResult::Pending => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_pays_net_of_stake() {
        assert_eq!(
            profit(Decimal::new(10, 0), Decimal::new(2, 0), BetResult::Win),
            Decimal::new(10, 0)
        );
        // 25 * 0.85 = 21.25
        assert_eq!(
            profit(Decimal::new(25, 0), Decimal::new(185, 2), BetResult::Win),
            Decimal::new(2125, 2)
        );
    }

    #[test]
    fn test_win_matches_gross_minus_stake() {
        let stake = Decimal::new(1337, 2);
        let odds = Decimal::new(317, 2);
        assert_eq!(profit(stake, odds, BetResult::Win), stake * odds - stake);
    }

    #[test]
    fn test_loss_forfeits_stake() {
        assert_eq!(
            profit(Decimal::new(20, 0), Decimal::new(15, 1), BetResult::Loss),
            Decimal::new(-20, 0)
        );
    }

    #[test]
    fn test_push_and_pending_are_flat() {
        let stake = Decimal::new(50, 0);
        let odds = Decimal::new(310, 2);
        assert_eq!(profit(stake, odds, BetResult::Push), Decimal::ZERO);
        assert_eq!(profit(stake, odds, BetResult::Pending), Decimal::ZERO);
    }

    #[test]
    fn test_win_saturates_instead_of_overflowing() {
        let stake = Decimal::MAX;
        assert_eq!(profit(stake, Decimal::new(3, 0), BetResult::Win), Decimal::MAX);
        assert_eq!(profit(stake, Decimal::new(3, 0), BetResult::Loss), -Decimal::MAX);
    }

    #[test]
    fn test_minimum_odds_win() {
        assert_eq!(
            profit(Decimal::new(100, 0), Decimal::new(101, 2), BetResult::Win),
            Decimal::ONE
        );
    }
}
