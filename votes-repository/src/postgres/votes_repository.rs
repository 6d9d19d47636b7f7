use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder, Row};
use tracing::debug;
use uuid::Uuid;
use votes_shared::types::{CounterField, CounterValues, EntityRef, Vote, VoteQuery};

use crate::config::PostgresConfig;
use crate::{VoteRepository, VoteRepositoryError};

const VOTE_COLUMNS: &str =
    "id, votable_type, votable_id, voter_type, voter_id, value, created_at, updated_at";

/// Row shape of the `votes` table.
#[derive(sqlx::FromRow)]
struct VoteRow {
    id: Uuid,
    votable_type: String,
    votable_id: Uuid,
    voter_type: String,
    voter_id: Uuid,
    value: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: row.id,
            votable_type: row.votable_type,
            votable_id: row.votable_id,
            voter_type: row.voter_type,
            voter_id: row.voter_id,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// PostgreSQL implementation of the votes repository.
///
/// Provides database operations for vote records and vote counters using
/// PostgreSQL with connection pooling and transaction support.
pub struct PostgresVoteRepository {
    pool: sqlx::PgPool,
}

impl PostgresVoteRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresVoteRepository)` - Ready-to-use repository instance
    /// * `Err(VoteRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, VoteRepositoryError> {
        Ok(Self { pool })
    }

    /// Connects a pool from configuration and wraps it in a repository.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, VoteRepositoryError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Self::new(pool).await
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), VoteRepositoryError> {
        sqlx::migrate!("src/postgres/migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }

    fn push_query_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &VoteQuery) {
        if let Some(votable) = &query.votable {
            builder
                .push(" AND votable_type = ")
                .push_bind(votable.type_tag.clone())
                .push(" AND votable_id = ")
                .push_bind(votable.id);
        }
        if let Some(voter) = &query.voter {
            builder
                .push(" AND voter_type = ")
                .push_bind(voter.type_tag.clone())
                .push(" AND voter_id = ")
                .push_bind(voter.id);
        }
        if let Some(votable_type) = &query.votable_type {
            builder.push(" AND votable_type = ").push_bind(votable_type.clone());
        }
        if let Some(voter_type) = &query.voter_type {
            builder.push(" AND voter_type = ").push_bind(voter_type.clone());
        }
        if let Some(value) = query.value {
            builder.push(" AND value = ").push_bind(value);
        }
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    async fn find_vote(
        &self,
        votable: &EntityRef,
        voter: &EntityRef,
    ) -> Result<Option<Vote>, VoteRepositoryError> {
        let row = sqlx::query_as::<_, VoteRow>(&format!(
            "SELECT {VOTE_COLUMNS} FROM votes \
             WHERE votable_type = $1 AND votable_id = $2 AND voter_type = $3 AND voter_id = $4 \
             ORDER BY created_at, id LIMIT 1"
        ))
        .bind(&votable.type_tag)
        .bind(votable.id)
        .bind(&voter.type_tag)
        .bind(voter.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Vote::from))
    }

    async fn find_votes(&self, query: &VoteQuery) -> Result<Vec<Vote>, VoteRepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {VOTE_COLUMNS} FROM votes WHERE TRUE"
        ));
        Self::push_query_filters(&mut builder, query);
        builder.push(" ORDER BY created_at, id");

        let rows = builder
            .build_query_as::<VoteRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Vote::from).collect())
    }

    /// Upserts the vote on the pair's unique key.
    ///
    /// The conflict branch only fires when the value differs, so an unchanged
    /// vote returns no row and the stored timestamp is read back instead.
    async fn save_vote(&self, vote: &Vote) -> Result<DateTime<Utc>, VoteRepositoryError> {
        let mut tx = self.pool.begin().await?;

        let upserted = sqlx::query_scalar::<_, DateTime<Utc>>(
            r#"
            INSERT INTO votes (id, votable_type, votable_id, voter_type, voter_id, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now(), now())
            ON CONFLICT (voter_type, voter_id, votable_type, votable_id)
            DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = GREATEST(now(), votes.updated_at + interval '1 microsecond')
            WHERE votes.value IS DISTINCT FROM EXCLUDED.value
            RETURNING updated_at
            "#,
        )
        .bind(vote.id)
        .bind(&vote.votable_type)
        .bind(vote.votable_id)
        .bind(&vote.voter_type)
        .bind(vote.voter_id)
        .bind(vote.value)
        .fetch_optional(&mut *tx)
        .await?;

        let updated_at = match upserted {
            Some(updated_at) => updated_at,
            None => {
                sqlx::query_scalar::<_, DateTime<Utc>>(
                    r#"
                    SELECT updated_at FROM votes
                    WHERE voter_type = $1 AND voter_id = $2 AND votable_type = $3 AND votable_id = $4
                    "#,
                )
                .bind(&vote.voter_type)
                .bind(vote.voter_id)
                .bind(&vote.votable_type)
                .bind(vote.votable_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        debug!(vote_id = %vote.id, value = vote.value, "Vote saved");
        Ok(updated_at)
    }

    async fn delete_votes(&self, votes: &[Vote]) -> Result<(), VoteRepositoryError> {
        if votes.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = votes.iter().map(|v| v.id).collect();
        sqlx::query("DELETE FROM votes WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn read_counters(&self, votable: &EntityRef) -> Result<CounterValues, VoteRepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT cached_votes_total, cached_votes_up, cached_votes_neutral, cached_votes_down
            FROM vote_counters
            WHERE votable_type = $1 AND votable_id = $2
            "#,
        )
        .bind(&votable.type_tag)
        .bind(votable.id)
        .fetch_optional(&self.pool)
        .await?;

        let mut values = CounterValues::new();
        if let Some(row) = row {
            for field in CounterField::ALL {
                if let Some(value) = row.try_get::<Option<i64>, _>(field.column_name())? {
                    values.insert(field, value);
                }
            }
        }
        Ok(values)
    }

    async fn write_counters(
        &self,
        votable: &EntityRef,
        values: &CounterValues,
    ) -> Result<(), VoteRepositoryError> {
        if values.is_empty() {
            return Ok(());
        }

        let mut builder = QueryBuilder::<Postgres>::new("INSERT INTO vote_counters (votable_type, votable_id");
        for field in values.keys() {
            builder.push(", ").push(field.column_name());
        }
        builder
            .push(") VALUES (")
            .push_bind(votable.type_tag.clone())
            .push(", ")
            .push_bind(votable.id);
        for value in values.values() {
            builder.push(", ").push_bind(*value);
        }
        builder.push(") ON CONFLICT (votable_type, votable_id) DO UPDATE SET ");
        let mut assignments = builder.separated(", ");
        for field in values.keys() {
            assignments.push(format!("{0} = EXCLUDED.{0}", field.column_name()));
        }

        builder.build().execute(&self.pool).await?;
        Ok(())
    }
}
