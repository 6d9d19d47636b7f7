//! The voting engine.
//!
//! `VotingEngine` records, changes and retracts the single vote a voter holds
//! on a votable, keeps declared counters in sync after every mutation and
//! answers aggregate queries from either side of the relation.
//!
//! Operations are split by perspective:
//!
//! - this module: mutations and cached counter reads
//! - `votable`: queries about the votes cast on a votable
//! - `voter`: queries about the votes cast by a voter
mod votable;
mod voter;

use std::sync::Arc;

use tracing::{debug, instrument};
use votes_repository::VoteRepository;
use votes_shared::types::{CounterField, Entity, EntityRef, Vote, VoteInput, VoteQuery};

use crate::aggregate;
use crate::cache::CacheSynchronizer;
use crate::config::EngineConfig;
use crate::errors::VotingError;
use crate::identity::{Role, TypeRegistry};
use crate::normalizer::normalize;

/// Records votes and maintains their aggregates.
///
/// The engine keeps no state between calls; every operation reports its
/// outcome through its return value.
pub struct VotingEngine {
    repository: Arc<dyn VoteRepository>,
    registry: Arc<TypeRegistry>,
    cache: CacheSynchronizer,
    config: EngineConfig,
}

impl VotingEngine {
    /// Creates a new engine with the default configuration.
    ///
    /// # Arguments
    ///
    /// * `repository` - Vote record store shared with the cache synchronizer
    /// * `registry` - Declared entity types and their voting roles
    pub fn new(repository: Arc<dyn VoteRepository>, registry: Arc<TypeRegistry>) -> Self {
        Self::with_config(repository, registry, EngineConfig::default())
    }

    pub fn with_config(
        repository: Arc<dyn VoteRepository>,
        registry: Arc<TypeRegistry>,
        config: EngineConfig,
    ) -> Self {
        Self {
            cache: CacheSynchronizer::new(repository.clone()),
            repository,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Casts or changes `voter`'s vote on `votable`.
    ///
    /// # Arguments
    ///
    /// * `votable` - Entity being voted on
    /// * `voter` - Entity casting the vote; `None` records nothing
    /// * `raw` - Vote input, normalized before it is stored
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The stored vote was created or its value changed
    /// * `Ok(false)` - No voter was given, or the same value was already stored
    /// * `Err(VotingError)` - Identity, persistence or counter failure
    #[instrument(skip_all, fields(votable = %votable.entity_type(), votable_id = %votable.entity_id()))]
    pub async fn vote(
        &self,
        votable: &dyn Entity,
        voter: Option<&dyn Entity>,
        raw: impl Into<VoteInput>,
    ) -> Result<bool, VotingError> {
        let value = normalize(&raw.into());
        let Some(voter) = voter else {
            debug!("Vote without voter ignored");
            return Ok(false);
        };

        let votable_ref = self.registry.votable_ref(votable)?;
        let voter_ref = self.registry.voter_ref(voter)?;

        let existing = self.repository.find_vote(&votable_ref, &voter_ref).await?;
        let prior_updated_at = existing.as_ref().map(|vote| vote.updated_at);
        let candidate = match existing {
            Some(mut vote) => {
                vote.value = value;
                vote
            }
            None => Vote::new(&votable_ref, &voter_ref, value),
        };

        let updated_at = self.repository.save_vote(&candidate).await?;
        let changed = prior_updated_at != Some(updated_at);

        if changed || self.config.sync_unchanged {
            self.sync_counters(votable, &votable_ref).await?;
        }

        debug!(voter = %voter_ref, value, changed, "Vote recorded");
        Ok(changed)
    }

    /// Retracts every vote `voter` holds on `votable`.
    ///
    /// Returns `Ok(false)` only when no voter is given. Retracting a vote that
    /// does not exist succeeds without touching the counters.
    #[instrument(skip_all, fields(votable = %votable.entity_type(), votable_id = %votable.entity_id()))]
    pub async fn unvote(
        &self,
        votable: &dyn Entity,
        voter: Option<&dyn Entity>,
    ) -> Result<bool, VotingError> {
        let Some(voter) = voter else {
            debug!("Unvote without voter ignored");
            return Ok(false);
        };

        let votable_ref = self.registry.votable_ref(votable)?;
        let voter_ref = self.registry.voter_ref(voter)?;

        let votes = self
            .repository
            .find_votes(&VoteQuery::pair(&votable_ref, &voter_ref))
            .await?;
        if votes.is_empty() {
            return Ok(true);
        }

        self.repository.delete_votes(&votes).await?;
        self.sync_counters(votable, &votable_ref).await?;

        debug!(voter = %voter_ref, removed = votes.len(), "Vote retracted");
        Ok(true)
    }

    pub async fn vote_up(
        &self,
        votable: &dyn Entity,
        voter: Option<&dyn Entity>,
    ) -> Result<bool, VotingError> {
        self.vote(votable, voter, 1i64).await
    }

    pub async fn vote_neutral(
        &self,
        votable: &dyn Entity,
        voter: Option<&dyn Entity>,
    ) -> Result<bool, VotingError> {
        self.vote(votable, voter, 0i64).await
    }

    pub async fn vote_down(
        &self,
        votable: &dyn Entity,
        voter: Option<&dyn Entity>,
    ) -> Result<bool, VotingError> {
        self.vote(votable, voter, -1i64).await
    }

    /// Reads a counter of `votable`.
    ///
    /// Returns the stored counter when the votable's type declares `field`, a
    /// value has been stored and `skip_cache` is false. Otherwise the count is
    /// computed from the live votes.
    pub async fn count_votes(
        &self,
        votable: &dyn Entity,
        field: CounterField,
        skip_cache: bool,
    ) -> Result<i64, VotingError> {
        let votable_ref = self.registry.votable_ref(votable)?;

        if !skip_cache && self.registry.has_counter(votable.entity_type(), field) {
            let stored = self.repository.read_counters(&votable_ref).await?;
            if let Some(value) = stored.get(&field) {
                return Ok(*value);
            }
        }

        let votes = self.repository.find_votes(&VoteQuery::on(&votable_ref)).await?;
        Ok(aggregate::counter_value(&votes, field))
    }

    pub async fn count_votes_total(
        &self,
        votable: &dyn Entity,
        skip_cache: bool,
    ) -> Result<i64, VotingError> {
        self.count_votes(votable, CounterField::Total, skip_cache).await
    }

    pub async fn count_votes_up(
        &self,
        votable: &dyn Entity,
        skip_cache: bool,
    ) -> Result<i64, VotingError> {
        self.count_votes(votable, CounterField::Up, skip_cache).await
    }

    pub async fn count_votes_neutral(
        &self,
        votable: &dyn Entity,
        skip_cache: bool,
    ) -> Result<i64, VotingError> {
        self.count_votes(votable, CounterField::Neutral, skip_cache).await
    }

    pub async fn count_votes_down(
        &self,
        votable: &dyn Entity,
        skip_cache: bool,
    ) -> Result<i64, VotingError> {
        self.count_votes(votable, CounterField::Down, skip_cache).await
    }

    /// Maps every entity and type criterion of a caller's filter onto the
    /// base types stored on votes.
    fn resolve_query(&self, filter: &VoteQuery) -> Result<VoteQuery, VotingError> {
        let mut query = filter.clone();
        if let Some(votable) = &filter.votable {
            query.votable = Some(self.registry.votable_ref(votable)?);
        }
        if let Some(voter) = &filter.voter {
            query.voter = Some(self.registry.voter_ref(voter)?);
        }
        if let Some(votable_type) = &filter.votable_type {
            query.votable_type = Some(self.registry.resolve(votable_type, Role::Votable)?.to_string());
        }
        if let Some(voter_type) = &filter.voter_type {
            query.voter_type = Some(self.registry.resolve(voter_type, Role::Voter)?.to_string());
        }
        Ok(query)
    }

    async fn sync_counters(
        &self,
        votable: &dyn Entity,
        votable_ref: &EntityRef,
    ) -> Result<(), VotingError> {
        let counters = self.registry.counter_fields(votable.entity_type())?;
        self.cache.sync(votable_ref, counters).await
    }
}
