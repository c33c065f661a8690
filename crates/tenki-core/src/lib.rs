pub mod app;
pub mod config;
pub mod error;
pub mod prefs;

pub use app::App;
pub use config::{Config, ConfigValidationError, ForecastConfig, ValidationResult};
pub use error::{AppError, ConfigError};
pub use prefs::{PrefsStore, SavedPrefs};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr, stdout carries the chart
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Tenki core initialized");
    Ok(())
}
