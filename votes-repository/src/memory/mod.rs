//! In-memory implementation of the votes repository.
//!
//! Keeps votes and counters behind a single `tokio::sync::RwLock`, so every
//! save is an atomic check-then-write on the voter/votable pair. Suitable for
//! tests, prototypes and embedding the engine without a database.
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use votes_shared::types::{CounterValues, EntityRef, Vote, VoteQuery};

use crate::{VoteRepository, VoteRepositoryError};

#[derive(Default)]
struct MemoryState {
    votes: Vec<Vote>,
    counters: HashMap<EntityRef, CounterValues>,
}

/// In-memory vote store.
#[derive(Default)]
pub struct InMemoryVoteRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts records as-is, bypassing the one-vote-per-pair upsert.
    ///
    /// Used to load existing data, including legacy duplicates that `unvote`
    /// is expected to clean up.
    pub async fn import_votes(&self, votes: Vec<Vote>) {
        self.state.write().await.votes.extend(votes);
    }

    /// Number of stored vote records.
    pub async fn len(&self) -> usize {
        self.state.read().await.votes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Returns a timestamp strictly after `previous`, so a changed record always
/// gets a new `updated_at` even within the clock's resolution.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find_vote(
        &self,
        votable: &EntityRef,
        voter: &EntityRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        let state = self.state.read().await;
        Ok(state.votes.iter().find(|v| v.is_pair(votable, voter)).cloned())
    }

    async fn find_votes(&self, query: &VoteQuery) -> Result<Vec<Vote>, VoteRepositoryError> {
        let state = self.state.read().await;
        Ok(state.votes.iter().filter(|v| query.matches(v)).cloned().collect())
    }

    async fn save_vote(&self, vote: &Vote) -> Result<DateTime<Utc>, VoteRepositoryError> {
        let votable = vote.votable();
        let voter = vote.voter();
        let mut state = self.state.write().await;

        if let Some(stored) = state.votes.iter_mut().find(|v| v.is_pair(&votable, &voter)) {
            if stored.value != vote.value {
                stored.value = vote.value;
                stored.updated_at = next_timestamp(stored.updated_at);
            }
            return Ok(stored.updated_at);
        }

        let now = Utc::now();
        let mut record = vote.clone();
        record.created_at = now;
        record.updated_at = now;
        state.votes.push(record);
        Ok(now)
    }

    async fn delete_votes(&self, votes: &[Vote]) -> Result<(), VoteRepositoryError> {
        if votes.is_empty() {
            return Ok(());
        }
        let mut state = self.state.write().await;
        state.votes.retain(|stored| !votes.iter().any(|v| v.id == stored.id));
        Ok(())
    }

    async fn read_counters(&self, votable: &EntityRef) -> Result<CounterValues, VoteRepositoryError> {
        let state = self.state.read().await;
        Ok(state.counters.get(votable).cloned().unwrap_or_default())
    }

    async fn write_counters(
        &self,
        votable: &EntityRef,
        values: &CounterValues,
    ) -> Result<(), VoteRepositoryError> {
        if values.is_empty() {
            return Ok(());
        }
        let mut state = self.state.write().await;
        let stored = state.counters.entry(votable.clone()).or_default();
        for (field, value) in values {
            stored.insert(*field, *value);
        }
        Ok(())
    }
}
