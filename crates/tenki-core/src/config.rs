use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined into one line
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and prefs.json
    #[serde(skip, default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// Forecast provider settings
    #[serde(default)]
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Forecast endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound for a whole load in seconds
    #[serde(default = "default_load_timeout_secs")]
    pub load_timeout_secs: u64,

    /// How long a fetched response is reused, in minutes
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,

    /// IANA zone used for "today" and for the API's local timestamps
    #[serde(default = "default_reference_timezone")]
    pub reference_timezone: String,
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tenki")
}

fn default_base_url() -> String {
    tenki_forecast::provider::OPEN_METEO_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    tenki_forecast::provider::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_load_timeout_secs() -> u64 {
    tenki_forecast::service::DEFAULT_LOAD_TIMEOUT.as_secs()
}

fn default_cache_ttl_minutes() -> u64 {
    tenki_forecast::cache::DEFAULT_CACHE_TTL.as_secs() / 60
}

fn default_reference_timezone() -> String {
    tenki_forecast::provider::DEFAULT_TIMEZONE.to_string()
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            load_timeout_secs: default_load_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
            reference_timezone: default_reference_timezone(),
        }
    }
}

impl ForecastConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }

    /// Parsed reference zone, falling back to the default on a bad name
    pub fn reference_zone(&self) -> Tz {
        self.reference_timezone
            .parse::<Tz>()
            .unwrap_or(tenki_forecast::filter::DEFAULT_REFERENCE_ZONE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_dir);

        if !path.exists() {
            let config = Self {
                config_dir,
                ..Self::default()
            };
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_dir = config_dir;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        let forecast = &self.forecast;

        self.validate_url(&forecast.base_url, "forecast.base_url", &mut result);

        if forecast.request_timeout_secs == 0 {
            result.add_error("forecast.request_timeout_secs", "Timeout must be greater than 0");
        }

        if forecast.load_timeout_secs == 0 {
            result.add_error("forecast.load_timeout_secs", "Timeout must be greater than 0");
        } else if forecast.load_timeout_secs < forecast.request_timeout_secs {
            result.add_warning(
                "forecast.load_timeout_secs",
                "Load timeout is shorter than the request timeout",
            );
        }

        if forecast.cache_ttl_minutes == 0 {
            result.add_warning("forecast.cache_ttl_minutes", "Response caching disabled (0 minutes)");
        } else if forecast.cache_ttl_minutes > 60 {
            result.add_warning(
                "forecast.cache_ttl_minutes",
                "Cached forecasts older than an hour may be stale",
            );
        }

        if forecast.reference_timezone.parse::<Tz>().is_err() {
            result.add_error(
                "forecast.reference_timezone",
                format!("Unknown time zone: {}", forecast.reference_timezone),
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Default path of the configuration file
    pub fn config_path() -> PathBuf {
        default_config_dir().join("config.toml")
    }

    /// Path of the saved preferences next to the config file
    pub fn prefs_path(&self) -> PathBuf {
        self.config_dir.join("prefs.json")
    }
}
