use crate::error::{AppError, AppResult};
use crate::models::{BetRecord, BetResult};
use crate::services::sync::SyncStatus;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: i64,
    pub event_type: String, // "bet_added", "result_updated", "bet_removed", "ledger_synced"
    pub bet_id: Option<Uuid>,
    pub details: serde_json::Value,
}

/// Append-only JSON-lines trail of ledger mutations
pub struct AuditTrailService {
    log_file: PathBuf,
    file_handle: Arc<Mutex<std::fs::File>>,
}

impl AuditTrailService {
    /// Create a new audit trail service writing under `log_directory`
    pub fn new(log_directory: PathBuf) -> AppResult<Self> {
        std::fs::create_dir_all(&log_directory)
            .map_err(|e| AppError::Message(format!("Failed to create log directory: {}", e)))?;

        // One file per day
        let date = chrono::Utc::now().format("%Y-%m-%d");
        let log_file = log_directory.join(format!("audit_{}.log", date));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| AppError::Message(format!("Failed to open audit log file: {}", e)))?;

        info!("Audit trail initialized: {:?}", log_file);

        Ok(Self {
            log_file,
            file_handle: Arc::new(Mutex::new(file)),
        })
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Log an audit entry
    pub async fn log(&self, entry: AuditLogEntry) -> AppResult<()> {
        let json = serde_json::to_string(&entry)?;

        let mut file = self.file_handle.lock().await;
        writeln!(file, "{}", json)
            .map_err(|e| AppError::Message(format!("Failed to write audit log: {}", e)))?;

        file.flush()
            .map_err(|e| AppError::Message(format!("Failed to flush audit log: {}", e)))?;

        Ok(())
    }

    /// Log a newly recorded bet
    pub async fn log_bet_added(&self, bet: &BetRecord) -> AppResult<()> {
        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: "bet_added".to_string(),
            bet_id: Some(bet.id),
            details: serde_json::json!({
                "market": bet.market,
                "stake": bet.stake.to_string(),
                "odds": bet.odds.to_string(),
                "result": bet.result,
                "profit": bet.profit.to_string(),
            }),
        };

        self.log(entry).await
    }

    /// Log a result change and the profit it produced
    pub async fn log_result_updated(
        &self,
        bet: &BetRecord,
        previous: BetResult,
    ) -> AppResult<()> {
        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: "result_updated".to_string(),
            bet_id: Some(bet.id),
            details: serde_json::json!({
                "from": previous,
                "to": bet.result,
                "profit": bet.profit.to_string(),
            }),
        };

        self.log(entry).await
    }

    pub async fn log_bet_removed(&self, bet: &BetRecord) -> AppResult<()> {
        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: "bet_removed".to_string(),
            bet_id: Some(bet.id),
            details: serde_json::json!({
                "market": bet.market,
                "result": bet.result,
            }),
        };

        self.log(entry).await
    }

    /// Log a webhook push attempt
    pub async fn log_ledger_synced(&self, bet_count: usize, status: SyncStatus) -> AppResult<()> {
        let entry = AuditLogEntry {
            timestamp: chrono::Utc::now().timestamp(),
            event_type: "ledger_synced".to_string(),
            bet_id: None,
            details: serde_json::json!({
                "bets": bet_count,
                "status": status.as_str(),
            }),
        };

        self.log(entry).await
    }
}
