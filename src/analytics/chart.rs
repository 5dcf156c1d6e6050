use crate::models::BetRecord;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const INSUFFICIENT_CHART_DATA_MESSAGE: &str =
    "Dados insuficientes para gerar gráfico (mínimo 2 apostas finalizadas).";

const MIN_CHART_POINTS: usize = 2;

/// One step of the cumulative-profit curve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub index: usize,
    /// None for the origin point
    pub placed_at: Option<DateTime<Utc>>,
    pub cumulative: Decimal,
    pub profit: Decimal,
}

/// Running profit over decisive bets in chronological order.
///
/// Returns `None` when fewer than two WIN/LOSS records exist. The first
/// point is always the zero origin.
pub fn cumulative_profit_series(records: &[BetRecord]) -> Option<Vec<ChartPoint>> {
    let mut decisive: Vec<&BetRecord> = records
        .iter()
        .filter(|r| r.result.is_decisive())
        .collect();

    if decisive.len() < MIN_CHART_POINTS {
        return None;
    }

    decisive.sort_by_key(|r| r.placed_at);

    let mut points = Vec::with_capacity(decisive.len() + 1);
    points.push(ChartPoint {
        index: 0,
        placed_at: None,
        cumulative: Decimal::ZERO,
        profit: Decimal::ZERO,
    });

    let mut cumulative = Decimal::ZERO;
    for (i, record) in decisive.into_iter().enumerate() {
        cumulative = cumulative.saturating_add(record.profit);
        points.push(ChartPoint {
            index: i + 1,
            placed_at: Some(record.placed_at),
            cumulative,
            profit: record.profit,
        });
    }

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BetDraft, BetResult};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn at(minutes: i64, stake: &str, odds: &str, result: BetResult) -> BetRecord {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        BetRecord::with_identity(
            BetDraft::new("Market", stake, odds)
                .with_result(result)
                .validate()
                .unwrap(),
            Uuid::new_v4(),
            base + Duration::minutes(minutes),
        )
    }

    #[test]
    fn test_needs_two_decisive_bets() {
        let ledger = vec![
            at(0, "10", "2.0", BetResult::Win),
            at(1, "10", "2.0", BetResult::Push),
            at(2, "10", "2.0", BetResult::Pending),
        ];
        assert!(cumulative_profit_series(&ledger).is_none());
    }

    #[test]
    fn test_series_is_chronological_with_origin() {
        // most-recent-first, as the ledger stores them
        let ledger = vec![
            at(30, "5", "3.0", BetResult::Win),
            at(20, "10", "2.0", BetResult::Pending),
            at(10, "20", "1.5", BetResult::Loss),
            at(0, "10", "2.0", BetResult::Win),
        ];
        let series = cumulative_profit_series(&ledger).unwrap();

        assert_eq!(series.len(), 4);
        assert_eq!(series[0].cumulative, Decimal::ZERO);
        assert!(series[0].placed_at.is_none());
        assert_eq!(series[1].cumulative, Decimal::new(10, 0));
        assert_eq!(series[2].cumulative, Decimal::new(-10, 0));
        assert_eq!(series[3].cumulative, Decimal::ZERO);
        assert_eq!(series[3].profit, Decimal::new(10, 0));
        assert_eq!(series[3].index, 3);
    }
}
