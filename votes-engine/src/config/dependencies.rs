//! Dependency initialization and wiring for the voting engine.

use std::env;
use std::sync::Arc;

use dotenv::dotenv;
use tracing::info;
use votes_repository::{InMemoryVoteRepository, PostgresConfig, PostgresVoteRepository};

use crate::config::EngineConfig;
use crate::engine::VotingEngine;
use crate::errors::DependenciesError;
use crate::identity::TypeRegistry;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured engine ready to record votes.
    pub engine: VotingEngine,
}

impl Dependencies {
    /// Initialize the engine against PostgreSQL from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `VOTES_DB_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `VOTES_RUN_MIGRATIONS`: apply bundled migrations on start (default: true)
    /// - `VOTES_SYNC_UNCHANGED`: sync counters after unchanged votes (default: true)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(DependenciesError)` - If configuration is invalid or the database is unreachable
    pub async fn from_env(registry: TypeRegistry) -> Result<Self, DependenciesError> {
        dotenv().ok();

        let postgres_config = PostgresConfig::from_env()?;
        let run_migrations = bool_var("VOTES_RUN_MIGRATIONS", true)?;
        let engine_config = engine_config_from_env()?;

        info!(
            max_connections = postgres_config.max_connections,
            run_migrations,
            sync_unchanged = engine_config.sync_unchanged,
            "Initializing dependencies"
        );

        let repository = PostgresVoteRepository::connect(&postgres_config).await?;
        info!("PostgreSQL connection established");

        if run_migrations {
            repository.migrate().await?;
            info!("Vote migrations applied");
        }

        let engine =
            VotingEngine::with_config(Arc::new(repository), Arc::new(registry), engine_config);
        Ok(Self { engine })
    }

    /// Wire the engine to an in-memory vote store.
    pub fn in_memory(registry: TypeRegistry) -> Self {
        info!("Initializing in-memory dependencies");
        let engine = VotingEngine::new(
            Arc::new(InMemoryVoteRepository::new()),
            Arc::new(registry),
        );
        Self { engine }
    }
}

/// Reads engine options from the environment.
fn engine_config_from_env() -> Result<EngineConfig, DependenciesError> {
    Ok(EngineConfig {
        sync_unchanged: bool_var("VOTES_SYNC_UNCHANGED", EngineConfig::default().sync_unchanged)?,
    })
}

/// Parses a boolean environment variable, falling back to `default` when unset.
fn bool_var(name: &'static str, default: bool) -> Result<bool, DependenciesError> {
    match env::var(name) {
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(DependenciesError::InvalidVar { name, value }),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("VOTES_RUN_MIGRATIONS");
            env::remove_var("VOTES_SYNC_UNCHANGED");
        }
    }

    #[test]
    #[serial]
    fn test_bool_var_defaults_when_unset() {
        clear_env_vars();
        assert!(bool_var("VOTES_RUN_MIGRATIONS", true).unwrap());
        assert!(!bool_var("VOTES_RUN_MIGRATIONS", false).unwrap());
    }

    #[test]
    #[serial]
    fn test_bool_var_parses_values() {
        clear_env_vars();
        unsafe {
            env::set_var("VOTES_RUN_MIGRATIONS", "FALSE");
        }
        assert!(!bool_var("VOTES_RUN_MIGRATIONS", true).unwrap());

        unsafe {
            env::set_var("VOTES_RUN_MIGRATIONS", "1");
        }
        assert!(bool_var("VOTES_RUN_MIGRATIONS", false).unwrap());
        clear_env_vars();
    }

    #[test]
    #[serial]
    fn test_bool_var_rejects_garbage() {
        clear_env_vars();
        unsafe {
            env::set_var("VOTES_SYNC_UNCHANGED", "sometimes");
        }

        let result = engine_config_from_env();
        assert!(matches!(
            result,
            Err(DependenciesError::InvalidVar { name: "VOTES_SYNC_UNCHANGED", .. })
        ));
        clear_env_vars();
    }

    #[tokio::test]
    #[serial]
    async fn test_from_env_missing_database_url() {
        clear_env_vars();
        unsafe {
            env::remove_var("DATABASE_URL");
        }

        let result = Dependencies::from_env(TypeRegistry::new()).await;
        // a developer .env file may provide DATABASE_URL
        if env::var("DATABASE_URL").is_err() {
            assert!(matches!(result, Err(DependenciesError::Config(_))));
        }
    }

    #[tokio::test]
    async fn test_in_memory_wiring() {
        let mut registry = TypeRegistry::new();
        registry.declare("Post", None).unwrap();
        registry.register_votable("Post", &[]).unwrap();

        let deps = Dependencies::in_memory(registry);
        assert!(deps.engine.registry().is_votable("Post"));
        assert!(deps.engine.config().sync_unchanged);
    }
}
