//! This module defines the `VoteRepository` trait, which provides an interface
//! for interacting with the underlying data store for vote records and the
//! denormalized counters kept on votables.
use chrono::{DateTime, Utc};
use votes_shared::types::{CounterValues, EntityRef, Vote, VoteQuery};

use crate::errors::VoteRepositoryError;

/// A trait that defines the interface for interacting with the votes data repository.
///
/// Implementors must enforce at most one vote per
/// `(voter_type, voter_id, votable_type, votable_id)` tuple: `save_vote` is an
/// atomic insert-or-update on that tuple, so two concurrent first votes by
/// the same pair can never produce two records.
#[async_trait::async_trait]
pub trait VoteRepository: Send + Sync {
    /// Finds the current vote of `voter` on `votable`.
    ///
    /// # Arguments
    ///
    /// * `votable` - Resolved reference of the votable
    /// * `voter` - Resolved reference of the voter
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Vote))` - The stored vote for the pair
    /// * `Ok(None)` - The pair has never voted (or the vote was retracted)
    /// * `Err(VoteRepositoryError)` - Storage failure
    async fn find_vote(
        &self,
        votable: &EntityRef,
        voter: &EntityRef,
    ) -> Result<Option<Vote>, VoteRepositoryError>;

    /// Lists all votes matching the query, oldest first.
    ///
    /// An empty result is not an error.
    async fn find_votes(&self, query: &VoteQuery) -> Result<Vec<Vote>, VoteRepositoryError>;

    /// Inserts a vote or updates the stored vote of the same pair.
    ///
    /// The stored `updated_at` only moves forward when the stored value
    /// actually changes; saving an unchanged value leaves the record untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(DateTime<Utc>)` - The persisted `updated_at` of the record
    /// * `Err(VoteRepositoryError)` - Storage failure, nothing was written
    async fn save_vote(&self, vote: &Vote) -> Result<DateTime<Utc>, VoteRepositoryError>;

    /// Deletes the given votes by record id. Unknown ids are ignored.
    async fn delete_votes(&self, votes: &[Vote]) -> Result<(), VoteRepositoryError>;

    /// Reads the stored counters of a votable. Counters never written are absent.
    async fn read_counters(&self, votable: &EntityRef) -> Result<CounterValues, VoteRepositoryError>;

    /// Writes the given counters of a votable in one combined update.
    ///
    /// Counters not present in `values` are left as they are.
    async fn write_counters(
        &self,
        votable: &EntityRef,
        values: &CounterValues,
    ) -> Result<(), VoteRepositoryError>;
}
