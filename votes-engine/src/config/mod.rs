//! Engine configuration, dependency wiring and tracing setup.
mod dependencies;

pub use dependencies::Dependencies;

use std::env;

use tracing::info;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for the `VotingEngine`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Synchronize counters after a save that did not change the stored vote.
    ///
    /// Defaults to `true`, which also repairs counters left stale by an
    /// earlier failed sync.
    pub sync_unchanged: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sync_unchanged: true,
        }
    }
}

impl EngineConfig {
    /// Create a config that only synchronizes counters when a vote changed.
    pub fn sync_on_change() -> Self {
        Self {
            sync_unchanged: false,
        }
    }
}

/// Initialize tracing/logging for host binaries and tests.
///
/// Reads the filter from `RUST_LOG` (default: `votes_engine=info,votes_repository=info`).
/// Set `VOTES_LOG_FORMAT=json` for JSON structured output.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("votes_engine=info,votes_repository=info"));

    let json = env::var("VOTES_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()?;
    }

    info!(
        service_name = "votes-engine",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
    Ok(())
}
