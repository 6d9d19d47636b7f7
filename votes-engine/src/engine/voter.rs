use votes_shared::types::{Entity, EntityRef, Vote, VoteQuery};

use crate::engine::VotingEngine;
use crate::errors::VotingError;

impl VotingEngine {
    /// Whether `voter` currently holds a vote on `votable`.
    pub async fn voted_on(
        &self,
        voter: &dyn Entity,
        votable: &dyn Entity,
    ) -> Result<bool, VotingError> {
        Ok(self.voted_as_when_voting_on(voter, votable).await?.is_some())
    }

    pub async fn voted_up_on(
        &self,
        voter: &dyn Entity,
        votable: &dyn Entity,
    ) -> Result<bool, VotingError> {
        Ok(self.voted_as_when_voting_on(voter, votable).await? == Some(1))
    }

    pub async fn voted_down_on(
        &self,
        voter: &dyn Entity,
        votable: &dyn Entity,
    ) -> Result<bool, VotingError> {
        Ok(self.voted_as_when_voting_on(voter, votable).await? == Some(-1))
    }

    /// The value `voter` gave `votable`, or `None` if they have not voted on it.
    pub async fn voted_as_when_voting_on(
        &self,
        voter: &dyn Entity,
        votable: &dyn Entity,
    ) -> Result<Option<i64>, VotingError> {
        self.vote_value_of(votable, voter).await
    }

    /// Votes cast by `voter`, narrowed by `filter`, oldest first.
    ///
    /// The voter criterion of `filter` is always replaced by `voter`. Entity
    /// and type criteria may name subtypes; they are resolved to base types.
    pub async fn find_votes_by(
        &self,
        voter: &dyn Entity,
        filter: &VoteQuery,
    ) -> Result<Vec<Vote>, VotingError> {
        let voter_ref = self.registry.voter_ref(voter)?;
        let query = self.resolve_query(filter)?.merge(&VoteQuery::by(&voter_ref));
        Ok(self.repository.find_votes(&query).await?)
    }

    pub async fn find_votes_by_value(
        &self,
        voter: &dyn Entity,
        value: i64,
    ) -> Result<Vec<Vote>, VotingError> {
        self.find_votes_by(voter, &VoteQuery::new().valued(value)).await
    }

    pub async fn find_up_votes(&self, voter: &dyn Entity) -> Result<Vec<Vote>, VotingError> {
        self.find_votes_by_value(voter, 1).await
    }

    pub async fn find_down_votes(&self, voter: &dyn Entity) -> Result<Vec<Vote>, VotingError> {
        self.find_votes_by_value(voter, -1).await
    }

    /// Votes cast by `voter` on votables of `votable_type`, optionally with one value.
    ///
    /// `votable_type` may name any registered votable type; subtypes are
    /// matched through their base type.
    pub async fn find_votes_for_type(
        &self,
        voter: &dyn Entity,
        votable_type: &str,
        value: Option<i64>,
    ) -> Result<Vec<Vote>, VotingError> {
        let mut filter = VoteQuery::new().for_type(votable_type);
        filter.value = value;
        self.find_votes_by(voter, &filter).await
    }

    /// Votables `voter` holds a vote on, in the order the votes were cast.
    pub async fn votables_of(&self, voter: &dyn Entity) -> Result<Vec<EntityRef>, VotingError> {
        let votes = self.find_votes_by(voter, &VoteQuery::new()).await?;
        Ok(votes.iter().map(Vote::votable).collect())
    }
}
