use crate::database::DatabaseError;
use sqlx::Error as SqlxError;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database errors
    #[error("SQL error: {0}")]
    Sqlx(#[from] SqlxError),

    /// Configuration errors (missing webhook URL, bad env values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors raised while accepting a bet draft
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport or remote-side failures of the analysis / webhook calls
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// UUID parsing errors
    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    /// Decimal parsing errors
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// File system errors (exports, audit log)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Check if the error came from rejecting user input
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::InvalidDecimal(_))
    }

    /// Check if the error is a missing or invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) | AppError::InvalidDecimal(_) | AppError::InvalidUuid(_) => 2,
            AppError::Config(_) => 3,
            AppError::ExternalService(_) => 4,
            _ => 1,
        }
    }
}

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database query error
    #[error("Query error: {0}")]
    Query(SqlxError),

    /// Persisted content exists but cannot be decoded
    #[error("Corrupt persisted content under '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Query(e) => AppError::Sqlx(e),
            RepositoryError::Corrupt { key, reason } => {
                AppError::Message(format!("Corrupt content under '{}': {}", key, reason))
            }
            RepositoryError::ConstraintViolation(msg) => AppError::Validation(msg),
            RepositoryError::InvalidInput(msg) => AppError::Validation(msg),
        }
    }
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) => {
                // SQLite extended result codes
                let code = db_err.code().map(|c| c.to_string());
                match code.as_deref() {
                    // UNIQUE, PRIMARYKEY, NOTNULL, CHECK
                    Some("2067") | Some("1555") | Some("1299") | Some("275") => {
                        RepositoryError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => RepositoryError::Query(err),
                }
            }
            _ => RepositoryError::Query(err),
        }
    }
}
