pub mod kv_store;
pub mod ledger_repository;
pub mod settings_repository;

// Re-export all repositories for convenient access
pub use kv_store::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use ledger_repository::{LedgerRepository, LEDGER_KEY};
pub use settings_repository::{SettingsRepository, WEBHOOK_URL_KEY};
