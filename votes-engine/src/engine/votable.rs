use num_rational::Ratio;
use votes_shared::types::{Entity, EntityRef, Vote, VoteAggregate, VoteQuery};

use crate::aggregate;
use crate::engine::VotingEngine;
use crate::errors::VotingError;

impl VotingEngine {
    /// Whether `voter` currently holds a vote on `votable`.
    pub async fn voted_on_by(
        &self,
        votable: &dyn Entity,
        voter: &dyn Entity,
    ) -> Result<bool, VotingError> {
        Ok(self.vote_value_of(votable, voter).await?.is_some())
    }

    /// The value of `voter`'s vote on `votable`, if any.
    pub async fn vote_value_of(
        &self,
        votable: &dyn Entity,
        voter: &dyn Entity,
    ) -> Result<Option<i64>, VotingError> {
        let votable_ref = self.registry.votable_ref(votable)?;
        let voter_ref = self.registry.voter_ref(voter)?;
        let vote = self.repository.find_vote(&votable_ref, &voter_ref).await?;
        Ok(vote.map(|vote| vote.value))
    }

    /// Votes cast on `votable`, narrowed by `filter`, oldest first.
    ///
    /// The votable criterion of `filter` is always replaced by `votable`. Entity
    /// and type criteria may name subtypes; they are resolved to base types.
    pub async fn find_votes(
        &self,
        votable: &dyn Entity,
        filter: &VoteQuery,
    ) -> Result<Vec<Vote>, VotingError> {
        let votable_ref = self.registry.votable_ref(votable)?;
        let query = self.resolve_query(filter)?.merge(&VoteQuery::on(&votable_ref));
        Ok(self.repository.find_votes(&query).await?)
    }

    /// Number of votes cast on `votable` that match `filter`, always read live.
    pub async fn votes_count(
        &self,
        votable: &dyn Entity,
        filter: &VoteQuery,
    ) -> Result<i64, VotingError> {
        Ok(self.find_votes(votable, filter).await?.len() as i64)
    }

    pub async fn up_votes(&self, votable: &dyn Entity) -> Result<Vec<Vote>, VotingError> {
        self.find_votes(votable, &VoteQuery::new().up()).await
    }

    pub async fn neutral_votes(&self, votable: &dyn Entity) -> Result<Vec<Vote>, VotingError> {
        self.find_votes(votable, &VoteQuery::new().neutral()).await
    }

    pub async fn down_votes(&self, votable: &dyn Entity) -> Result<Vec<Vote>, VotingError> {
        self.find_votes(votable, &VoteQuery::new().down()).await
    }

    pub async fn votes_sum(&self, votable: &dyn Entity) -> Result<i128, VotingError> {
        let votes = self.find_votes(votable, &VoteQuery::new()).await?;
        Ok(aggregate::sum(&votes))
    }

    pub async fn mean_vote(&self, votable: &dyn Entity) -> Result<Ratio<i128>, VotingError> {
        let votes = self.find_votes(votable, &VoteQuery::new()).await?;
        Ok(aggregate::mean(&votes))
    }

    pub async fn winner_vote(&self, votable: &dyn Entity) -> Result<Option<i64>, VotingError> {
        let votes = self.find_votes(votable, &VoteQuery::new()).await?;
        Ok(aggregate::winner(&votes))
    }

    /// Every aggregate over the live votes of `votable`, computed from one read.
    pub async fn aggregate(&self, votable: &dyn Entity) -> Result<VoteAggregate, VotingError> {
        let votes = self.find_votes(votable, &VoteQuery::new()).await?;
        Ok(aggregate::summarize(&votes))
    }

    /// Voters holding a vote on `votable`, in the order they first voted.
    pub async fn voters_of(&self, votable: &dyn Entity) -> Result<Vec<EntityRef>, VotingError> {
        let votes = self.find_votes(votable, &VoteQuery::new()).await?;
        Ok(votes.iter().map(Vote::voter).collect())
    }
}
