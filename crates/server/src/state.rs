//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::maps::{GoogleMapsClient, MapsError};
use crate::store::RecordStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the record store, the
/// mapping client, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: RecordStore,
    maps: Option<GoogleMapsClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mapping client is only constructed when an API key is
    /// configured; endpoints that need it respond 503 otherwise.
    #[must_use]
    pub fn new(config: Config, store: RecordStore) -> Self {
        let maps = config.maps.as_ref().map(GoogleMapsClient::new);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                maps,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.inner.store
    }

    /// The mapping client, if an API key is configured.
    #[must_use]
    pub fn maps(&self) -> Option<&GoogleMapsClient> {
        self.inner.maps.as_ref()
    }

    /// The mapping client, or `MapsError::NotConfigured`.
    ///
    /// # Errors
    ///
    /// Returns `MapsError::NotConfigured` when no API key is configured.
    pub fn maps_required(&self) -> Result<&GoogleMapsClient, MapsError> {
        self.maps().ok_or(MapsError::NotConfigured)
    }
}
