use crate::error::RepositoryError;
use crate::models::BetRecord;
use crate::repositories::KeyValueStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed slot holding the JSON array of bet records
pub const LEDGER_KEY: &str = "bettrackr_bets";

/// Persists the whole ledger as a single JSON snapshot
#[derive(Clone)]
pub struct LedgerRepository {
    store: Arc<dyn KeyValueStore>,
}

impl LedgerRepository {
    /// Create a new LedgerRepository
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted ledger, surfacing unreadable content as an error
    pub async fn try_load(&self) -> Result<Vec<BetRecord>, RepositoryError> {
        let Some(raw) = self.store.get(LEDGER_KEY).await? else {
            return Ok(Vec::new());
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| RepositoryError::Corrupt {
            key: LEDGER_KEY.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load the persisted ledger. Absent, unreadable or corrupt content
    /// yields an empty ledger.
    pub async fn load(&self) -> Vec<BetRecord> {
        match self.try_load().await {
            Ok(records) => {
                debug!("Loaded {} bet records", records.len());
                records
            }
            Err(e) => {
                warn!("Discarding persisted ledger: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the persisted snapshot with `records`
    pub async fn save(&self, records: &[BetRecord]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(records).map_err(|e| {
            RepositoryError::InvalidInput(format!("Cannot serialize ledger: {}", e))
        })?;
        self.store.set(LEDGER_KEY, &json).await
    }
}
