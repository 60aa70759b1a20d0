//! Application state with repository-based storage.
//!
//! The state is cloned into every request handler and carries the
//! repository trait objects plus the loaded configuration. The concrete
//! backend is selected at compile time via feature flags.

use std::sync::Arc;

use kennelcal_core::storage::{EventRepository, SeriesRepository};

use crate::config::Config;

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "sqlite"))]
compile_error!("Cannot enable both 'inmemory' and 'sqlite' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Event repository.
    pub events: Arc<dyn EventRepository>,
    /// Series repository.
    pub series: Arc<dyn SeriesRepository>,
    /// Loaded configuration.
    pub config: Config,
}

#[cfg(feature = "inmemory")]
impl AppState {
    /// Creates state backed by the in-memory repository.
    pub fn in_memory(config: Config) -> Self {
        let repository = Arc::new(crate::storage::InMemoryRepository::new());
        Self {
            events: repository.clone(),
            series: repository,
            config,
        }
    }
}

#[cfg(feature = "sqlite")]
impl AppState {
    /// Creates state backed by the SQLite repository at the configured path.
    pub async fn sqlite(config: Config) -> anyhow::Result<Self> {
        let repository = Arc::new(crate::storage::SqliteRepository::new(&config.sqlite_path).await?);
        Ok(Self {
            events: repository.clone(),
            series: repository,
            config,
        })
    }
}
