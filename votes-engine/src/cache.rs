//! Keeps the denormalized vote counters of a votable in line with its votes.
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, instrument, warn};
use votes_repository::{VoteRepository, VoteRepositoryError};
use votes_shared::types::{CounterField, CounterValues, EntityRef, VoteQuery};

use crate::aggregate;
use crate::errors::VotingError;

/// Recomputes and stores counter fields after a vote mutation.
///
/// This is the only component that writes counters. Each sync reads one
/// snapshot of the votable's votes and writes every declared field in a
/// single call.
pub struct CacheSynchronizer {
    repository: Arc<dyn VoteRepository>,
}

impl CacheSynchronizer {
    pub fn new(repository: Arc<dyn VoteRepository>) -> Self {
        Self { repository }
    }

    /// Synchronizes the declared `counters` of `votable` with its live votes.
    ///
    /// Does nothing when no counters are declared. Any storage failure is
    /// reported as `VotingError::CacheWrite`: the vote records stay
    /// authoritative and the counters remain stale until the next sync.
    #[instrument(skip_all, fields(votable = %votable))]
    pub async fn sync(
        &self,
        votable: &EntityRef,
        counters: &BTreeSet<CounterField>,
    ) -> Result<(), VotingError> {
        if counters.is_empty() {
            return Ok(());
        }

        let values = match self.live_values(votable, counters).await {
            Ok(values) => values,
            Err(source) => return Err(cache_write_error(votable, source)),
        };

        if let Err(source) = self.repository.write_counters(votable, &values).await {
            return Err(cache_write_error(votable, source));
        }

        debug!(?values, "Vote counters synchronized");
        Ok(())
    }

    async fn live_values(
        &self,
        votable: &EntityRef,
        counters: &BTreeSet<CounterField>,
    ) -> Result<CounterValues, VoteRepositoryError> {
        let votes = self.repository.find_votes(&VoteQuery::on(votable)).await?;
        Ok(counters
            .iter()
            .map(|field| (*field, aggregate::counter_value(&votes, *field)))
            .collect())
    }
}

fn cache_write_error(
    votable: &EntityRef,
    source: VoteRepositoryError,
) -> VotingError {
    warn!(votable = %votable, error = %source, "Failed to synchronize vote counters");
    VotingError::CacheWrite {
        votable: votable.clone(),
        source,
    }
}
