//! Ledger exports: a delimited-text file and a plain-text tabular report.
//!
//! Both list the same columns, newest bet first, and refuse an empty ledger.

use crate::error::{AppError, AppResult};
use crate::models::{BetRecord, Stats};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

pub const NO_DATA_MESSAGE: &str = "Não há dados para exportar.";

pub const EXPORT_COLUMNS: [&str; 6] = ["Date", "Market", "Stake", "Odds", "Result", "Profit"];

const REPORT_TITLE: &str = "Histórico de Apostas - BetTrackr";

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "report" | "txt" => Ok(ExportFormat::Report),
            _ => Err(AppError::Validation(format!(
                "Invalid export format: {}. Must be one of: csv, report",
                s
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
        }
    }

    /// `bettrackr_historico_<date>.<ext>`
    pub fn default_file_name(&self, date: NaiveDate) -> PathBuf {
        PathBuf::from(format!(
            "bettrackr_historico_{}.{}",
            date.format("%Y-%m-%d"),
            self.extension()
        ))
    }
}

/// One formatted line of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub market: String,
    pub stake: String,
    pub odds: String,
    pub result: String,
    pub profit: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 6] {
        [
            self.date.as_str(),
            self.market.as_str(),
            self.stake.as_str(),
            self.odds.as_str(),
            self.result.as_str(),
            self.profit.as_str(),
        ]
    }
}

/// Format the ledger for export, newest first
pub fn export_rows(bets: &[BetRecord]) -> AppResult<Vec<ExportRow>> {
    if bets.is_empty() {
        return Err(AppError::Validation(NO_DATA_MESSAGE.to_string()));
    }

    let mut sorted: Vec<&BetRecord> = bets.iter().collect();
    sorted.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));

    Ok(sorted
        .into_iter()
        .map(|bet| ExportRow {
            date: bet.placed_at.format("%Y-%m-%d").to_string(),
            market: bet.market.clone(),
            stake: format!("{:.2}", bet.stake),
            odds: format!("{:.2}", bet.odds),
            result: bet.result.to_string(),
            profit: format!("{:.2}", bet.profit),
        })
        .collect())
}

/// Write the ledger as CSV to `path`
pub async fn write_csv(path: &Path, bets: &[BetRecord]) -> AppResult<()> {
    let rows = export_rows(bets)?;

    let file = tokio::fs::File::create(path).await?;
    let mut writer = csv_async::AsyncWriterBuilder::new().create_writer(file);

    writer.write_record(&EXPORT_COLUMNS).await.map_err(csv_error)?;
    for row in &rows {
        writer.write_record(&row.cells()).await.map_err(csv_error)?;
    }
    writer.flush().await.map_err(|e| csv_error(e.into()))?;

    info!("Exported {} bets to {}", rows.len(), path.display());
    Ok(())
}

/// Render the titled report with an aligned table
pub fn render_report(
    bets: &[BetRecord],
    stats: &Stats,
    generated_at: DateTime<Utc>,
) -> AppResult<String> {
    let rows: Vec<[String; 6]> = export_rows(bets)?
        .into_iter()
        .map(|r| {
            [
                r.date,
                r.market,
                format!("R$ {}", r.stake),
                r.odds,
                r.result,
                format!("R$ {}", r.profit),
            ]
        })
        .collect();

    let mut widths = EXPORT_COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 6]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&format!("Gerado em: {}\n", generated_at.format("%Y-%m-%d")));
    out.push_str(&format!("Total de Apostas: {}\n", bets.len()));
    out.push_str(&format!("Lucro Líquido: R$ {:.2}\n\n", stats.net_profit));

    out.push_str(&format_line(EXPORT_COLUMNS));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for row in &rows {
        let cells = [
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
            row[5].as_str(),
        ];
        out.push_str(&format_line(cells));
        out.push('\n');
    }

    Ok(out)
}

/// Write the rendered report to `path`
pub async fn write_report(path: &Path, bets: &[BetRecord], stats: &Stats) -> AppResult<()> {
    let report = render_report(bets, stats, Utc::now())?;
    tokio::fs::write(path, report).await?;
    info!("Exported report of {} bets to {}", bets.len(), path.display());
    Ok(())
}

fn csv_error(e: csv_async::Error) -> AppError {
    AppError::Message(format!("CSV export failed: {}", e))
}
