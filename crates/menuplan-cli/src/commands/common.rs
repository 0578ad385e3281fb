//! Shared wiring for CLI commands.

use std::sync::Arc;
use std::time::Duration;

use menuplan_core::{Config, ConnectivityMonitor, CoreError, HttpApi, LocalStore};

/// Everything a command needs: store, API client and connectivity state.
pub struct AppContext {
    pub store: Arc<LocalStore>,
    pub monitor: Arc<ConnectivityMonitor>,
    pub api: HttpApi,
}

impl AppContext {
    /// Loads config, opens the store and probes the backend once to
    /// seed the connectivity monitor. `--offline` skips the probe.
    pub async fn build(force_offline: bool) -> Result<Self, CoreError> {
        let config = Config::load()?;

        let store = match &config.data_dir {
            Some(dir) => LocalStore::new_with_path(dir.join("store.json")),
            None => LocalStore::open()?,
        };

        let api = HttpApi::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        let online = if force_offline { false } else { api.ping().await };
        tracing::debug!(online, "connectivity probe complete");

        Ok(Self {
            store: Arc::new(store),
            monitor: Arc::new(ConnectivityMonitor::new(online)),
            api,
        })
    }
}
