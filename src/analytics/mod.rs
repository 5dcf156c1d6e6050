//! Pure ledger arithmetic: the profit rule, the statistics fold and the
//! cumulative-profit series behind the chart. No I/O happens here.

pub mod chart;
pub mod profit;
pub mod stats;

pub use chart::{cumulative_profit_series, ChartPoint, INSUFFICIENT_CHART_DATA_MESSAGE};
pub use profit::profit;
pub use stats::{aggregate, quick_summary};
