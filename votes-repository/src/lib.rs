//! # Votes Repository
//! This crate provides the storage contract for vote records and denormalized
//! vote counters. It includes definitions for errors, interfaces, connection
//! configuration, and concrete implementations backed by memory and PostgreSQL.
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use config::PostgresConfig;
pub use errors::{ConfigError, VoteRepositoryError};
pub use interfaces::VoteRepository;
pub use memory::InMemoryVoteRepository;
pub use postgres::PostgresVoteRepository;
