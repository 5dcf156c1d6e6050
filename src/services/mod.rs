pub mod analysis;
pub mod audit;
pub mod export;
pub mod ledger_controller;
pub mod sync;

pub use analysis::AnalysisService;
pub use audit::{AuditLogEntry, AuditTrailService};
pub use export::{ExportFormat, ExportRow};
pub use ledger_controller::LedgerController;
pub use sync::{SyncService, SyncStatus};
