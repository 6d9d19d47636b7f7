//! Error types for the voting engine.
//! Defines the errors that can occur while recording, retracting or counting votes.
use thiserror::Error;
use votes_repository::VoteRepositoryError;
use votes_shared::types::EntityRef;

use crate::errors::IdentityError;

/// Represents errors that can occur within the voting engine.
///
/// A `CacheWrite` error means the vote record itself was persisted or
/// deleted; only the denormalized counters of `votable` are stale.
#[derive(Debug, Error)]
pub enum VotingError {
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] VoteRepositoryError),

    #[error("Failed to write vote counters for {votable}: {source}")]
    CacheWrite {
        votable: EntityRef,
        #[source]
        source: VoteRepositoryError,
    },
}
