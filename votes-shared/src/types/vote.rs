use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{EntityId, EntityRef};

/// Represents a voter's current vote on a votable.
///
/// At most one `Vote` exists per `(voter_type, voter_id, votable_type, votable_id)`
/// tuple; voting again on the same pair updates this record in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub id: Uuid,
    pub votable_type: String,
    pub votable_id: EntityId,
    pub voter_type: String,
    pub voter_id: EntityId,
    pub value: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    /// Builds an unsaved vote for a resolved votable/voter pair.
    ///
    /// Timestamps are placeholders until the repository persists the record.
    pub fn new(votable: &EntityRef, voter: &EntityRef, value: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            votable_type: votable.type_tag.clone(),
            votable_id: votable.id,
            voter_type: voter.type_tag.clone(),
            voter_id: voter.id,
            value,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn votable(&self) -> EntityRef {
        EntityRef::new(self.votable_type.clone(), self.votable_id)
    }

    pub fn voter(&self) -> EntityRef {
        EntityRef::new(self.voter_type.clone(), self.voter_id)
    }

    /// Returns true if this vote belongs to the given votable/voter pair.
    pub fn is_pair(&self, votable: &EntityRef, voter: &EntityRef) -> bool {
        self.votable_type == votable.type_tag
            && self.votable_id == votable.id
            && self.voter_type == voter.type_tag
            && self.voter_id == voter.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vote_copies_pair() {
        let votable = EntityRef::new("Post", Uuid::new_v4());
        let voter = EntityRef::new("User", Uuid::new_v4());
        let vote = Vote::new(&votable, &voter, -1);

        assert_eq!(vote.votable(), votable);
        assert_eq!(vote.voter(), voter);
        assert_eq!(vote.value, -1);
        assert_eq!(vote.created_at, vote.updated_at);
        assert!(vote.is_pair(&votable, &voter));
    }

    #[test]
    fn test_is_pair_checks_types() {
        let id = Uuid::new_v4();
        let votable = EntityRef::new("Post", id);
        let voter = EntityRef::new("User", Uuid::new_v4());
        let vote = Vote::new(&votable, &voter, 1);

        assert!(!vote.is_pair(&EntityRef::new("Comment", id), &voter));
        assert!(!vote.is_pair(&voter, &votable));
    }
}
