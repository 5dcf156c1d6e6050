use crate::analytics::{aggregate, quick_summary};
use crate::error::AppResult;
use crate::models::{BetDraft, BetRecord, BetResult, QuickSummary, Stats};
use crate::repositories::LedgerRepository;
use crate::services::AuditTrailService;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Owner of the in-memory ledger.
///
/// Every mutation runs validate -> mutate -> persist before returning, and
/// statistics are recomputed from the current snapshot on request.
pub struct LedgerController {
    repo: LedgerRepository,
    bets: Vec<BetRecord>,
    audit: Option<Arc<AuditTrailService>>,
}

impl LedgerController {
    /// Load the persisted ledger and take ownership of it
    pub async fn bootstrap(repo: LedgerRepository) -> Self {
        let bets = repo.load().await;
        info!("Ledger loaded with {} bets", bets.len());
        Self {
            repo,
            bets,
            audit: None,
        }
    }

    /// Record every applied mutation in an audit trail
    pub fn with_audit(mut self, audit: Arc<AuditTrailService>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate a draft and prepend the resulting record.
    ///
    /// Nothing is stored when validation fails. When the save fails the
    /// record stays in the in-memory ledger and the error is returned, so a
    /// caller must not retry the same draft.
    pub async fn add(&mut self, draft: BetDraft) -> AppResult<BetRecord> {
        let valid = draft.validate().map_err(|e| {
            warn!("Rejected bet draft: {}", e);
            e
        })?;

        let record = BetRecord::new(valid);
        info!(
            "Adding bet {}: market={}, stake={}, odds={}, result={}",
            record.id, record.market, record.stake, record.odds, record.result
        );

        self.bets.insert(0, record.clone());
        self.persist().await?;

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_bet_added(&record).await {
                warn!("Audit write failed: {}", e);
            }
        }

        Ok(record)
    }

    /// Remove a record. Returns false, without persisting, when the id is unknown.
    pub async fn remove(&mut self, id: Uuid) -> AppResult<bool> {
        let Some(pos) = self.bets.iter().position(|b| b.id == id) else {
            debug!("Remove ignored, no bet {}", id);
            return Ok(false);
        };

        let removed = self.bets.remove(pos);
        info!("Removed bet {} ({})", removed.id, removed.market);
        self.persist().await?;

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_bet_removed(&removed).await {
                warn!("Audit write failed: {}", e);
            }
        }

        Ok(true)
    }

    /// Change a record's result and recompute its profit.
    ///
    /// Returns the updated record, or None when the id is unknown.
    pub async fn update_result(
        &mut self,
        id: Uuid,
        result: BetResult,
    ) -> AppResult<Option<BetRecord>> {
        let Some(bet) = self.bets.iter_mut().find(|b| b.id == id) else {
            debug!("Result update ignored, no bet {}", id);
            return Ok(None);
        };

        let previous = bet.result;
        bet.settle(result);
        let updated = bet.clone();

        info!(
            "Bet {} result {} -> {}, profit={}",
            updated.id, previous, updated.result, updated.profit
        );
        self.persist().await?;

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_result_updated(&updated, previous).await {
                warn!("Audit write failed: {}", e);
            }
        }

        Ok(Some(updated))
    }

    /// Current ledger, most recent first
    pub fn snapshot(&self) -> &[BetRecord] {
        &self.bets
    }

    pub fn get(&self, id: Uuid) -> Option<&BetRecord> {
        self.bets.iter().find(|b| b.id == id)
    }

    pub fn stats(&self) -> Stats {
        aggregate(&self.bets)
    }

    pub fn quick_summary(&self) -> QuickSummary {
        quick_summary(&self.bets)
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    async fn persist(&self) -> AppResult<()> {
        self.repo.save(&self.bets).await.map_err(|e| {
            warn!("Failed to persist ledger: {}", e);
            e.into()
        })
    }
}
