//! PostgreSQL implementation of the votes repository.
//!
//! Provides a PostgreSQL backend for the `VoteRepository` trait with
//! connection pooling, transaction safety and upsert-based vote persistence.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - One vote per pair enforced by a unique index and `ON CONFLICT DO UPDATE`
//! - `updated_at` only moves when the stored value changes
//! - Filterable listings built with `QueryBuilder`
//!
//! ## Database Tables
//!
//! - `votes`: Individual vote records, unique per voter/votable pair
//! - `vote_counters`: Denormalized counters per votable
mod votes_repository;

pub use votes_repository::PostgresVoteRepository;
