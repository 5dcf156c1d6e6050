//! BetTrackr Library
//!
//! Personal bet ledger: exact-decimal profit tracking, derived statistics,
//! exports, and optional analysis / webhook collaborators.

pub mod analytics;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};

use config::AnalysisConfig;
use database::{create_pool, run_migrations};
use repositories::*;
use services::{AnalysisService, AuditTrailService, LedgerController, SyncService, SyncStatus};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state containing the ledger and its collaborators
pub struct AppState {
    pub settings_repo: Arc<SettingsRepository>,
    pub ledger: LedgerController,
    pub analysis: AnalysisService,
    pub sync: SyncService,
}

impl AppState {
    /// Open the database, run migrations and load the ledger
    pub async fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let pool = create_pool(&config.database).await?;
        run_migrations(&pool).await?;
        info!("Database migrations completed");

        let audit = match AuditTrailService::new(config.audit_log_dir.clone()) {
            Ok(audit) => Some(Arc::new(audit)),
            Err(e) => {
                warn!("Audit trail disabled: {}", e);
                None
            }
        };

        Ok(Self::from_pool(pool, config.analysis.clone(), audit).await)
    }

    /// Wire every collaborator on top of an existing, migrated pool
    pub async fn from_pool(
        pool: sqlx::SqlitePool,
        analysis_config: AnalysisConfig,
        audit: Option<Arc<AuditTrailService>>,
    ) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKvStore::new(pool));

        let mut ledger = LedgerController::bootstrap(LedgerRepository::new(store.clone())).await;
        let mut sync = SyncService::new();
        if let Some(audit) = audit {
            ledger = ledger.with_audit(audit.clone());
            sync = sync.with_audit(audit);
        }

        Self {
            settings_repo: Arc::new(SettingsRepository::new(store)),
            ledger,
            analysis: AnalysisService::new(analysis_config),
            sync,
        }
    }

    /// Push the current ledger to the configured webhook
    pub async fn sync_now(&mut self) -> AppResult<SyncStatus> {
        let url = self.settings_repo.webhook_url().await?;
        let stats = self.ledger.stats();
        self.sync
            .push(url.as_deref(), self.ledger.snapshot(), &stats)
            .await
    }

    /// Ask the analysis collaborator for a report on the current ledger
    pub async fn analyze(&self) -> String {
        self.analysis.analyze(self.ledger.snapshot()).await
    }
}
