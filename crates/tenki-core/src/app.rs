use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::prefs::{PrefsStore, SavedPrefs};
use crate::Config;

/// Main application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
    store: PrefsStore,
    prefs: SavedPrefs,
}

impl App {
    /// Create an application instance from `path`, or from the default
    /// config location
    pub fn from_config_path(path: Option<&Path>) -> Result<Self> {
        let (config, _warnings) = Config::load_validated(path)?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: Config) -> Self {
        let store = PrefsStore::new(config.prefs_path());
        let prefs = store.load();
        tracing::info!(
            "Loaded preferences: {} / {} metric(s) / {}",
            prefs.city,
            prefs.metrics.len(),
            prefs.period
        );

        Self {
            config: Arc::new(config),
            store,
            prefs,
        }
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prefs(&self) -> &SavedPrefs {
        &self.prefs
    }

    pub fn set_prefs(&mut self, prefs: SavedPrefs) {
        self.prefs = prefs;
    }

    /// Persist the current preferences
    pub fn shutdown(&self) -> Result<()> {
        tracing::info!("Shutting down application");
        self.store.save(&self.prefs)
    }
}
