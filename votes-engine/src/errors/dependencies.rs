//! Error types for wiring the votes engine to its storage.
use thiserror::Error;
use votes_repository::{ConfigError, VoteRepositoryError};

/// Represents errors that can occur while initializing engine dependencies.
#[derive(Debug, Error)]
pub enum DependenciesError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] VoteRepositoryError),

    #[error("Invalid value `{value}` for {name}")]
    InvalidVar { name: &'static str, value: String },
}
