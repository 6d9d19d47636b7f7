//! Error types for the identity resolver of the votes engine.
//! Defines the errors raised when a type name cannot be resolved for a role.
use thiserror::Error;

use crate::identity::Role;

/// Represents errors that can occur while resolving entity types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Type `{0}` is not declared")]
    UndeclaredType(String),

    #[error("Parent type `{parent}` of `{name}` is not declared")]
    UndeclaredParent { name: String, parent: String },

    #[error("Type `{name}` is already declared")]
    AlreadyDeclared { name: String },

    #[error("Type `{name}` is not registered as a {role}")]
    NotRegistered { name: String, role: Role },
}
