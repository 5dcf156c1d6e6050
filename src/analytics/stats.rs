use crate::models::{BetRecord, BetResult, QuickSummary, Stats};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Fold the ledger into its summary statistics.
///
/// ROI is measured against settled stake (pushes included, pending
/// excluded) while `total_staked` counts every record. Win rate ignores
/// pushes. Both ratios are zero when their denominator is zero.
pub fn aggregate(records: &[BetRecord]) -> Stats {
    let mut stats = Stats::default();
    let mut settled_staked = Decimal::ZERO;

    for record in records {
        stats.total_bets += 1;
        stats.total_staked = stats.total_staked.saturating_add(record.stake);
        stats.net_profit = stats.net_profit.saturating_add(record.profit);

        match record.result {
            BetResult::Win => stats.wins += 1,
            BetResult::Loss => stats.losses += 1,
            BetResult::Push => stats.pushes += 1,
            BetResult::Pending => stats.pending += 1,
        }

        if record.result.is_settled() {
            settled_staked = settled_staked.saturating_add(record.stake);
        }
    }

    if settled_staked > Decimal::ZERO {
        stats.roi = percentage(stats.net_profit, settled_staked);
    }

    let decisive = stats.wins + stats.losses;
    if decisive > 0 {
        stats.win_rate = percentage(Decimal::from(stats.wins), Decimal::from(decisive));
    }

    stats
}

/// `part / whole * 100` for a positive `whole`, clamped to the Decimal range
fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(HUNDRED),
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Pending count plus the best and worst single results
pub fn quick_summary(records: &[BetRecord]) -> QuickSummary {
    records.iter().fold(QuickSummary::default(), |mut acc, record| {
        if record.result == BetResult::Pending {
            acc.pending += 1;
        }
        acc.biggest_win = acc.biggest_win.max(record.profit);
        acc.biggest_loss = acc.biggest_loss.min(record.profit);
        acc
    })
}
