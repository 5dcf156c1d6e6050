//! Domain models for the bet ledger.
//!
//! `BetRecord` is the only persisted entity; `Stats` and `QuickSummary`
//! are derived views over the ledger.

pub mod bet;
pub mod stats;

// Re-export all models for convenient access
pub use bet::{
    BetDraft, BetRecord, BetResult, ValidatedDraft, DEFAULT_SPORT, MAX_ODDS, MAX_STAKE, MIN_ODDS,
};
pub use stats::{QuickSummary, Stats};
