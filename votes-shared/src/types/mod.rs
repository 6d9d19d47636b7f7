mod aggregate;
mod counter;
mod entity;
mod vote;
mod vote_input;
mod vote_query;

pub use aggregate::VoteAggregate;
pub use counter::{CounterField, CounterValues};
pub use entity::{Entity, EntityId, EntityRef};
pub use vote::Vote;
pub use vote_input::VoteInput;
pub use vote_query::VoteQuery;
