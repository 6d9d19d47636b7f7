//! Integration tests for PostgreSQL votes repository implementation.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_integration -- --ignored`

use sqlx::Row;
use uuid::Uuid;
use votes_repository::{PostgresVoteRepository, VoteRepository};
use votes_shared::types::{CounterField, CounterValues, EntityRef, Vote, VoteQuery};

/// Creates a votable/voter pair with fresh ids.
fn make_pair() -> (EntityRef, EntityRef) {
    (
        EntityRef::new("Post", Uuid::new_v4()),
        EntityRef::new("User", Uuid::new_v4()),
    )
}

// ============================================================================
// Votes Tests
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_save_vote_inserts_record(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, voter) = make_pair();

    repository.save_vote(&Vote::new(&votable, &voter, 1)).await.unwrap();

    let rows = sqlx::query("SELECT votable_type, value FROM votes")
        .fetch_all(&pool)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get::<String, _>("votable_type"), "Post");
    assert_eq!(rows[0].get::<i64, _>("value"), 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_save_vote_updates_same_pair(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, voter) = make_pair();

    let first = repository.save_vote(&Vote::new(&votable, &voter, -1)).await.unwrap();
    let second = repository.save_vote(&Vote::new(&votable, &voter, 1)).await.unwrap();

    assert!(second > first);
    let votes = repository.find_votes(&VoteQuery::on(&votable)).await.unwrap();
    assert_eq!(votes.len(), 1);
    assert_eq!(votes[0].value, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_save_unchanged_vote_keeps_timestamp(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, voter) = make_pair();

    let first = repository.save_vote(&Vote::new(&votable, &voter, 1)).await.unwrap();
    let second = repository.save_vote(&Vote::new(&votable, &voter, 1)).await.unwrap();

    assert_eq!(first, second);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_find_votes_with_filters(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, alice) = make_pair();
    let bob = EntityRef::new("User", Uuid::new_v4());

    repository.save_vote(&Vote::new(&votable, &alice, 1)).await.unwrap();
    repository.save_vote(&Vote::new(&votable, &bob, -1)).await.unwrap();

    let all = repository.find_votes(&VoteQuery::on(&votable)).await.unwrap();
    let down = repository.find_votes(&VoteQuery::on(&votable).down()).await.unwrap();
    let by_type = repository.find_votes(&VoteQuery::by(&alice).for_type("Post")).await.unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].voter(), bob);
    assert_eq!(by_type.len(), 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_delete_votes(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, voter) = make_pair();

    repository.save_vote(&Vote::new(&votable, &voter, 1)).await.unwrap();
    let stored = repository.find_votes(&VoteQuery::on(&votable)).await.unwrap();
    repository.delete_votes(&stored).await.unwrap();

    assert!(repository.find_vote(&votable, &voter).await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_delete_empty_votes(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    repository.delete_votes(&[]).await.unwrap();
}

// ============================================================================
// Vote Counters Tests
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
#[ignore = "requires a PostgreSQL database"]
async fn test_write_and_read_counters(pool: sqlx::PgPool) {
    let repository = PostgresVoteRepository::new(pool.clone()).await.unwrap();
    let (votable, _) = make_pair();

    assert!(repository.read_counters(&votable).await.unwrap().is_empty());

    let mut values = CounterValues::new();
    values.insert(CounterField::Total, 2);
    values.insert(CounterField::Up, 1);
    repository.write_counters(&votable, &values).await.unwrap();

    let mut update = CounterValues::new();
    update.insert(CounterField::Up, 0);
    repository.write_counters(&votable, &update).await.unwrap();

    let stored = repository.read_counters(&votable).await.unwrap();
    assert_eq!(stored.get(&CounterField::Total), Some(&2));
    assert_eq!(stored.get(&CounterField::Up), Some(&0));
    assert_eq!(stored.get(&CounterField::Neutral), None);
}
