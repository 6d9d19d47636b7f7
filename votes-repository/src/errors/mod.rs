//! Error types for the votes repository.
//! Consolidates and re-exports error types related to vote storage and its configuration.
mod config;
mod votes;

pub use config::ConfigError;
pub use votes::VoteRepositoryError;
