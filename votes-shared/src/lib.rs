//! # Votes Shared
//! This crate defines shared data structures and types used across the votes ecosystem.
//! It includes polymorphic entity references, vote records, raw vote inputs, vote
//! queries, denormalized counters and aggregate summaries.
pub mod types;
