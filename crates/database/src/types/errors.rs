//! Error types for the database layer

use thiserror::Error;

/// Errors surfaced by the data access layer.
///
/// Query failures keep the driver error intact so callers can inspect
/// constraint violations and connectivity problems themselves.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Database query error: {0}")]
    Query(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the underlying driver reported a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Query(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }

    /// True when the underlying driver reported a FOREIGN KEY violation.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            DatabaseError::Query(sqlx::Error::Database(db)) => db.is_foreign_key_violation(),
            _ => false,
        }
    }
}
