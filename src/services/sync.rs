use crate::error::{AppError, AppResult};
use crate::models::{BetRecord, Stats};
use crate::services::AuditTrailService;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const MISSING_WEBHOOK_MESSAGE: &str =
    "Configure a URL do webhook (set-webhook <url>) antes de sincronizar.";

/// Outcome of the most recent push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Idle,
    Success,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Idle => "idle",
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SyncPayload<'a> {
    synced_at: DateTime<Utc>,
    stats: &'a Stats,
    bets: &'a [BetRecord],
}

/// One-way push of the ledger to a spreadsheet webhook
pub struct SyncService {
    client: reqwest::Client,
    status: SyncStatus,
    audit: Option<Arc<AuditTrailService>>,
}

impl SyncService {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            status: SyncStatus::Idle,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: Arc<AuditTrailService>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Send the ledger to `url`.
    ///
    /// A missing URL fails with `AppError::Config` before any request and
    /// leaves the status untouched. Once a request is issued the response is
    /// not inspected: any completed exchange counts as success.
    pub async fn push(
        &mut self,
        url: Option<&str>,
        bets: &[BetRecord],
        stats: &Stats,
    ) -> AppResult<SyncStatus> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AppError::Config(MISSING_WEBHOOK_MESSAGE.to_string()))?;

        let payload = SyncPayload {
            synced_at: Utc::now(),
            stats,
            bets,
        };

        info!("Pushing {} bets to webhook", bets.len());

        self.status = match self.client.post(url).json(&payload).send().await {
            Ok(_) => SyncStatus::Success,
            Err(e) => {
                warn!("Webhook push failed: {}", e);
                SyncStatus::Error
            }
        };

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_ledger_synced(bets.len(), self.status).await {
                warn!("Audit write failed: {}", e);
            }
        }

        Ok(self.status)
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_url_blocks_push() {
        let mut sync = SyncService::new();
        let err = sync.push(None, &[], &Stats::default()).await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(sync.status(), SyncStatus::Idle);

        let err = sync.push(Some("   "), &[], &Stats::default()).await.unwrap_err();
        assert!(err.is_config());
        assert_eq!(sync.status(), SyncStatus::Idle);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_error_status() {
        let mut sync = SyncService::new();
        // port 1 on loopback refuses connections
        let status = sync
            .push(Some("http://127.0.0.1:1/hook"), &[], &Stats::default())
            .await
            .unwrap();
        assert_eq!(status, SyncStatus::Error);
        assert_eq!(sync.status(), SyncStatus::Error);
    }
}
