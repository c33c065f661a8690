//! Centralized error types for Tenki.
//!
//! Every error reaching the command line is an [`AppError`]; use
//! `user_message()` to get the text shown to the user.

use tenki_forecast::ForecastError;
use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Forecast(e) => e.user_message(),
            AppError::Config(e) => e.user_message().to_string(),
            AppError::Io(_) => "Failed to write output. Please try again.".to_string(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.".to_string(),
        }
    }

    /// Whether running the command again can help
    pub fn is_retryable(&self) -> bool {
        match self {
            AppError::Forecast(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_messages_pass_through() {
        let err = AppError::from(ForecastError::RateLimited);
        assert_eq!(
            err.user_message(),
            "Too many requests. Please wait a moment and try again."
        );
        assert_eq!(err.exit_code(), 1);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_io_error() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.user_message(), "Failed to write output. Please try again.");
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_config_error() {
        let err = AppError::from(ConfigError::Invalid("forecast.base_url: Invalid URL".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration: forecast.base_url: Invalid URL"
        );
        assert_eq!(err.user_message(), "Invalid configuration. Check your settings.");
        assert_eq!(err.exit_code(), 2);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_other_errors_are_generic() {
        let err = AppError::from(anyhow::anyhow!("boom"));
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.user_message(), "An unexpected error occurred. Please try again.");
    }
}
