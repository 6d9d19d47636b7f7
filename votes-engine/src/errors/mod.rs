mod identity;
mod voting;
mod dependencies;

pub use identity::IdentityError;
pub use voting::VotingError;
pub use dependencies::DependenciesError;
