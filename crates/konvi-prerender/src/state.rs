//! Application state shared across all requests.

use std::sync::Arc;

use crate::config::Config;
use crate::error::PrerenderError;
use crate::store::StoreClient;

/// Shared, immutable application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Client for the remote JSON store.
    pub store: StoreClient,
}

impl AppState {
    /// Create a new application state from configuration.
    pub fn new(config: Config) -> Result<Self, PrerenderError> {
        let store = StoreClient::new(&config.store_url)?;

        tracing::info!(
            store_url = %config.store_url,
            site_url = %config.site_url,
            "application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
        })
    }
}
