use serde::{Deserialize, Serialize};

use crate::types::{EntityRef, Vote};

/// Filter criteria for listing votes.
///
/// Every field left as `None` matches all votes. Builders mirror the usual
/// scopes: `on` a votable, `by` a voter, `valued` a value, `for_type` and
/// `by_type` a votable or voter type tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteQuery {
    pub votable: Option<EntityRef>,
    pub voter: Option<EntityRef>,
    pub votable_type: Option<String>,
    pub voter_type: Option<String>,
    pub value: Option<i64>,
}

impl VoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Votes cast on the given votable.
    pub fn on(votable: &EntityRef) -> Self {
        Self {
            votable: Some(votable.clone()),
            ..Self::default()
        }
    }

    /// Votes cast by the given voter.
    pub fn by(voter: &EntityRef) -> Self {
        Self {
            voter: Some(voter.clone()),
            ..Self::default()
        }
    }

    /// Votes cast on `votable` by `voter`.
    pub fn pair(votable: &EntityRef, voter: &EntityRef) -> Self {
        Self::on(votable).with_voter(voter)
    }

    pub fn with_voter(mut self, voter: &EntityRef) -> Self {
        self.voter = Some(voter.clone());
        self
    }

    pub fn valued(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn up(self) -> Self {
        self.valued(1)
    }

    pub fn neutral(self) -> Self {
        self.valued(0)
    }

    pub fn down(self) -> Self {
        self.valued(-1)
    }

    pub fn for_type(mut self, votable_type: impl Into<String>) -> Self {
        self.votable_type = Some(votable_type.into());
        self
    }

    pub fn by_type(mut self, voter_type: impl Into<String>) -> Self {
        self.voter_type = Some(voter_type.into());
        self
    }

    /// Merges another query's criteria into this one. Criteria set on `other` win.
    pub fn merge(mut self, other: &VoteQuery) -> Self {
        if other.votable.is_some() {
            self.votable = other.votable.clone();
        }
        if other.voter.is_some() {
            self.voter = other.voter.clone();
        }
        if other.votable_type.is_some() {
            self.votable_type = other.votable_type.clone();
        }
        if other.voter_type.is_some() {
            self.voter_type = other.voter_type.clone();
        }
        if other.value.is_some() {
            self.value = other.value;
        }
        self
    }

    /// Checks whether a vote satisfies every criterion of this query.
    pub fn matches(&self, vote: &Vote) -> bool {
        if let Some(votable) = &self.votable {
            if vote.votable_type != votable.type_tag || vote.votable_id != votable.id {
                return false;
            }
        }
        if let Some(voter) = &self.voter {
            if vote.voter_type != voter.type_tag || vote.voter_id != voter.id {
                return false;
            }
        }
        if let Some(votable_type) = &self.votable_type {
            if &vote.votable_type != votable_type {
                return false;
            }
        }
        if let Some(voter_type) = &self.voter_type {
            if &vote.voter_type != voter_type {
                return false;
            }
        }
        if let Some(value) = self.value {
            if vote.value != value {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_vote(value: i64) -> (EntityRef, EntityRef, Vote) {
        let votable = EntityRef::new("Post", Uuid::new_v4());
        let voter = EntityRef::new("User", Uuid::new_v4());
        let vote = Vote::new(&votable, &voter, value);
        (votable, voter, vote)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let (_, _, vote) = make_vote(3);
        assert!(VoteQuery::new().matches(&vote));
    }

    #[test]
    fn test_on_and_by() {
        let (votable, voter, vote) = make_vote(1);
        let other = EntityRef::new("Post", Uuid::new_v4());

        assert!(VoteQuery::on(&votable).matches(&vote));
        assert!(!VoteQuery::on(&other).matches(&vote));
        assert!(VoteQuery::by(&voter).matches(&vote));
        assert!(VoteQuery::pair(&votable, &voter).matches(&vote));
        assert!(!VoteQuery::pair(&votable, &other).matches(&vote));
    }

    #[test]
    fn test_value_scopes() {
        let (votable, _, vote) = make_vote(-1);

        assert!(VoteQuery::on(&votable).down().matches(&vote));
        assert!(!VoteQuery::on(&votable).up().matches(&vote));
        assert!(!VoteQuery::on(&votable).neutral().matches(&vote));
        assert!(!VoteQuery::on(&votable).valued(42).matches(&vote));
    }

    #[test]
    fn test_type_scopes() {
        let (_, _, vote) = make_vote(1);

        assert!(VoteQuery::new().for_type("Post").matches(&vote));
        assert!(!VoteQuery::new().for_type("Comment").matches(&vote));
        assert!(VoteQuery::new().by_type("User").matches(&vote));
        assert!(!VoteQuery::new().by_type("Bot").matches(&vote));
    }

    #[test]
    fn test_merge_prefers_other() {
        let (votable, voter, _) = make_vote(1);
        let merged = VoteQuery::on(&votable).valued(1).merge(&VoteQuery::by(&voter).valued(-1));

        assert_eq!(merged.votable, Some(votable));
        assert_eq!(merged.voter, Some(voter));
        assert_eq!(merged.value, Some(-1));
    }
}
