//! Error types for dbworker

use thiserror::Error;

/// Result type alias for dbworker operations
pub type DbResult<T> = Result<T, DbError>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum DbError {
    /// Invalid column descriptor or primary-key set
    #[error("Configuration error: {0}")]
    Config(String),

    /// Conditions or data that cannot be normalized into column/value pairs
    #[error("Shape error: {0}")]
    Shape(String),

    /// Multi-row insert whose value sequences disagree on the row count
    #[error("Row count mismatch on column '{column}': expected {expected} values, found {found}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Invalid SQL identifier
    #[error("Validation error: {0}")]
    Validation(String),

    /// The engine rejected or failed the statement
    #[error("Engine error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Any other constraint violation (NOT NULL, CHECK, FOREIGN KEY, PRIMARY KEY)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Value decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DbError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a shape error
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if the engine reported any constraint failure
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_) | Self::ConstraintViolation(_))
    }

    /// Parse a rusqlite error into a more specific DbError
    pub fn from_engine(err: rusqlite::Error) -> Self {
        use rusqlite::ffi;

        if let rusqlite::Error::SqliteFailure(code, message) = &err {
            if code.code == rusqlite::ErrorCode::ConstraintViolation {
                let message = message
                    .clone()
                    .unwrap_or_else(|| "constraint failed".to_string());
                return match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        Self::UniqueViolation(message)
                    }
                    _ => Self::ConstraintViolation(message),
                };
            }
        }
        Self::Engine(err)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
