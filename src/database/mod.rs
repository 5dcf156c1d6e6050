//! SQLite connection handling for the key-value persistence medium.

pub mod pool;

pub use pool::{create_pool, run_migrations, DatabaseError};
