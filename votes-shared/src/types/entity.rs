use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a voter or votable entity.
pub type EntityId = Uuid;

/// A polymorphic pointer to a voter or votable entity.
///
/// The `type_tag` stored on a vote is always the resolved base type of the
/// entity, so instances of different subtypes of one base type share a tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityRef {
    pub type_tag: String,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(type_tag: impl Into<String>, id: EntityId) -> Self {
        Self {
            type_tag: type_tag.into(),
            id,
        }
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_tag, self.id)
    }
}

/// A domain object that can take part in voting, either as voter or as votable.
///
/// `entity_type` must return the most-derived type name of the instance; the
/// type registry collapses it to the registered base type.
pub trait Entity: Send + Sync {
    fn entity_type(&self) -> &str;
    fn entity_id(&self) -> EntityId;
}

impl Entity for EntityRef {
    fn entity_type(&self) -> &str {
        &self.type_tag
    }

    fn entity_id(&self) -> EntityId {
        self.id
    }
}
