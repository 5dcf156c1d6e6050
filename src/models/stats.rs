use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Derived summary of the whole ledger. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_bets: usize,
    pub wins: usize,
    pub losses: usize,
    pub pushes: usize,
    pub pending: usize,
    /// Sum of stake over every record, pending included
    pub total_staked: Decimal,
    pub net_profit: Decimal,
    /// Percentage of net profit over settled stake
    pub roi: Decimal,
    /// Percentage of wins over wins + losses
    pub win_rate: Decimal,
}

impl Stats {
    /// Records with a result other than PENDING
    pub fn settled(&self) -> usize {
        self.wins + self.losses + self.pushes
    }
}

/// Side panel figures shown next to the main statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickSummary {
    pub pending: usize,
    /// Largest single profit, floored at zero
    pub biggest_win: Decimal,
    /// Largest single loss, capped at zero
    pub biggest_loss: Decimal,
}
