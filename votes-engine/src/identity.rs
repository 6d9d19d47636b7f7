//! Polymorphic identity resolution for voters and votables.
//!
//! Every type that takes part in voting is declared up front, optionally with
//! a parent type. Votes are always tagged with the root of the declaring
//! type's hierarchy, so instances of sibling subtypes land in one partition
//! and are counted together.
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::{self, Display, Formatter};

use votes_shared::types::{CounterField, Entity, EntityRef};

use crate::errors::IdentityError;

/// The part an entity type plays in a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Votable,
    Voter,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Role::Votable => write!(f, "votable"),
            Role::Voter => write!(f, "voter"),
        }
    }
}

#[derive(Debug, Clone)]
struct TypeEntry {
    parent: Option<String>,
    base: String,
}

/// Registry of entity types, their hierarchy and their voting roles.
///
/// Base types are computed once when a type is declared; resolution never
/// changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
    votables: HashMap<String, BTreeSet<CounterField>>,
    voters: HashSet<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type, optionally as a subtype of an already declared parent.
    ///
    /// Declaring the same type twice with the same parent is a no-op.
    ///
    /// # Errors
    ///
    /// * `IdentityError::UndeclaredParent` - `parent` has not been declared
    /// * `IdentityError::AlreadyDeclared` - `name` exists with a different parent
    pub fn declare(&mut self, name: &str, parent: Option<&str>) -> Result<(), IdentityError> {
        if let Some(existing) = self.types.get(name) {
            if existing.parent.as_deref() == parent {
                return Ok(());
            }
            return Err(IdentityError::AlreadyDeclared {
                name: name.to_string(),
            });
        }

        let base = match parent {
            Some(parent) => self
                .types
                .get(parent)
                .map(|entry| entry.base.clone())
                .ok_or_else(|| IdentityError::UndeclaredParent {
                    name: name.to_string(),
                    parent: parent.to_string(),
                })?,
            None => name.to_string(),
        };

        self.types.insert(
            name.to_string(),
            TypeEntry {
                parent: parent.map(str::to_string),
                base,
            },
        );
        Ok(())
    }

    /// Registers a declared type as votable along with the counter fields it keeps.
    ///
    /// Subtypes inherit the registration unless they register themselves.
    pub fn register_votable(
        &mut self,
        name: &str,
        counters: &[CounterField],
    ) -> Result<(), IdentityError> {
        self.ensure_declared(name)?;
        self.votables
            .insert(name.to_string(), counters.iter().copied().collect());
        Ok(())
    }

    /// Registers a declared type as a voter. Subtypes inherit the registration.
    pub fn register_voter(&mut self, name: &str) -> Result<(), IdentityError> {
        self.ensure_declared(name)?;
        self.voters.insert(name.to_string());
        Ok(())
    }

    /// Resolves a type name to the base type tag stored on votes.
    ///
    /// # Errors
    ///
    /// * `IdentityError::UndeclaredType` - the type was never declared
    /// * `IdentityError::NotRegistered` - neither the type nor an ancestor has the role
    pub fn resolve(&self, type_name: &str, role: Role) -> Result<&str, IdentityError> {
        let entry = self
            .types
            .get(type_name)
            .ok_or_else(|| IdentityError::UndeclaredType(type_name.to_string()))?;

        if self.registered_ancestor(type_name, role).is_none() {
            return Err(IdentityError::NotRegistered {
                name: type_name.to_string(),
                role,
            });
        }
        Ok(&entry.base)
    }

    pub fn votable_ref(&self, entity: &dyn Entity) -> Result<EntityRef, IdentityError> {
        let base = self.resolve(entity.entity_type(), Role::Votable)?;
        Ok(EntityRef::new(base, entity.entity_id()))
    }

    pub fn voter_ref(&self, entity: &dyn Entity) -> Result<EntityRef, IdentityError> {
        let base = self.resolve(entity.entity_type(), Role::Voter)?;
        Ok(EntityRef::new(base, entity.entity_id()))
    }

    pub fn is_votable(&self, name: &str) -> bool {
        self.registered_ancestor(name, Role::Votable).is_some()
    }

    pub fn is_voter(&self, name: &str) -> bool {
        self.registered_ancestor(name, Role::Voter).is_some()
    }

    /// Counter fields kept for a votable type, taken from the nearest
    /// registered type in its hierarchy.
    pub fn counter_fields(&self, type_name: &str) -> Result<&BTreeSet<CounterField>, IdentityError> {
        self.resolve(type_name, Role::Votable)?;
        self.registered_ancestor(type_name, Role::Votable)
            .and_then(|name| self.votables.get(name))
            .ok_or_else(|| IdentityError::NotRegistered {
                name: type_name.to_string(),
                role: Role::Votable,
            })
    }

    /// Whether a votable type keeps the given counter field.
    pub fn has_counter(&self, type_name: &str, field: CounterField) -> bool {
        self.counter_fields(type_name)
            .map(|fields| fields.contains(&field))
            .unwrap_or(false)
    }

    fn ensure_declared(&self, name: &str) -> Result<(), IdentityError> {
        if self.types.contains_key(name) {
            Ok(())
        } else {
            Err(IdentityError::UndeclaredType(name.to_string()))
        }
    }

    /// Walks from `name` up to the root and returns the first type registered for `role`.
    fn registered_ancestor<'a>(&'a self, name: &'a str, role: Role) -> Option<&'a str> {
        let mut current = Some(name);
        while let Some(type_name) = current {
            let registered = match role {
                Role::Votable => self.votables.contains_key(type_name),
                Role::Voter => self.voters.contains(type_name),
            };
            if registered {
                return Some(type_name);
            }
            current = self
                .types
                .get(type_name)
                .and_then(|entry| entry.parent.as_deref());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.declare("Post", None).unwrap();
        registry.declare("Article", Some("Post")).unwrap();
        registry.declare("Review", Some("Article")).unwrap();
        registry.declare("User", None).unwrap();
        registry.declare("Admin", Some("User")).unwrap();
        registry
            .register_votable("Post", &[CounterField::Total, CounterField::Up])
            .unwrap();
        registry.register_voter("User").unwrap();
        registry
    }

    #[test]
    fn test_resolve_collapses_to_root() {
        let registry = make_registry();

        assert_eq!(registry.resolve("Post", Role::Votable).unwrap(), "Post");
        assert_eq!(registry.resolve("Article", Role::Votable).unwrap(), "Post");
        assert_eq!(registry.resolve("Review", Role::Votable).unwrap(), "Post");
        assert_eq!(registry.resolve("Admin", Role::Voter).unwrap(), "User");
    }

    #[test]
    fn test_resolve_undeclared_type() {
        let registry = make_registry();

        assert_eq!(
            registry.resolve("Comment", Role::Votable),
            Err(IdentityError::UndeclaredType("Comment".to_string()))
        );
    }

    #[test]
    fn test_resolve_wrong_role() {
        let registry = make_registry();

        assert_eq!(
            registry.resolve("Post", Role::Voter),
            Err(IdentityError::NotRegistered {
                name: "Post".to_string(),
                role: Role::Voter,
            })
        );
        assert!(!registry.is_voter("Article"));
        assert!(registry.is_votable("Review"));
        assert!(registry.is_voter("Admin"));
    }

    #[test]
    fn test_role_registered_on_subtype_only() {
        let mut registry = TypeRegistry::new();
        registry.declare("Content", None).unwrap();
        registry.declare("Photo", Some("Content")).unwrap();
        registry.register_votable("Photo", &[]).unwrap();

        assert_eq!(registry.resolve("Photo", Role::Votable).unwrap(), "Content");
        assert!(registry.resolve("Content", Role::Votable).is_err());
    }

    #[test]
    fn test_declare_errors() {
        let mut registry = make_registry();

        assert!(matches!(
            registry.declare("Orphan", Some("Missing")),
            Err(IdentityError::UndeclaredParent { .. })
        ));
        assert!(registry.declare("Article", Some("Post")).is_ok());
        assert!(matches!(
            registry.declare("Article", None),
            Err(IdentityError::AlreadyDeclared { .. })
        ));
        assert!(matches!(
            registry.register_voter("Ghost"),
            Err(IdentityError::UndeclaredType(_))
        ));
    }

    #[test]
    fn test_counter_fields_inherited() {
        let mut registry = make_registry();

        assert!(registry.has_counter("Review", CounterField::Up));
        assert!(!registry.has_counter("Review", CounterField::Down));

        registry
            .register_votable("Review", &[CounterField::Down])
            .unwrap();
        assert!(registry.has_counter("Review", CounterField::Down));
        assert!(!registry.has_counter("Review", CounterField::Up));
        assert!(registry.has_counter("Article", CounterField::Up));
        assert!(!registry.has_counter("User", CounterField::Total));
    }

    #[test]
    fn test_entity_refs() {
        let registry = make_registry();
        let id = Uuid::new_v4();

        let votable = registry.votable_ref(&EntityRef::new("Review", id)).unwrap();
        let voter = registry.voter_ref(&EntityRef::new("Admin", id)).unwrap();

        assert_eq!(votable, EntityRef::new("Post", id));
        assert_eq!(voter, EntityRef::new("User", id));
    }
}
