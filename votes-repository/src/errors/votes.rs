//! Error types for the votes repository.
//! Defines specific errors that can occur during storage operations on votes and counters.
use thiserror::Error;

/// Represents errors that can occur within the votes repository.
///
/// This enum consolidates various error conditions specific to storage
/// interactions, such as SQLx errors during database operations.
#[derive(Debug, Error)]
pub enum VoteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl VoteRepositoryError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
