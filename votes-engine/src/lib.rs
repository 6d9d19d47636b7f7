//! # Votes Engine
//! This crate records, changes and retracts the votes voters cast on votables
//! and computes aggregates over them.
//! It includes the value normalizer, the type registry used to resolve
//! polymorphic entity references, the aggregator, the counter cache
//! synchronizer and the `VotingEngine` that ties them to a `VoteRepository`.
pub mod aggregate;
pub mod cache;
pub mod config;
pub mod engine;
pub mod identity;
pub mod normalizer;

pub mod errors;

pub use cache::CacheSynchronizer;
pub use config::{Dependencies, EngineConfig};
pub use engine::VotingEngine;
pub use errors::{DependenciesError, IdentityError, VotingError};
pub use identity::{Role, TypeRegistry};
pub use normalizer::{NEGATIVE_WORDS, POSITIVE_WORDS, normalize};
