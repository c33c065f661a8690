//! Forecast fetch errors.
//!
//! Only the fetch boundary can fail; the pipeline itself never does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Rate limited by forecast provider")]
    RateLimited,

    #[error("Forecast request timed out")]
    Timeout,

    #[error("Forecast API error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(reqwest::Error),

    #[error("Invalid forecast response: {0}")]
    Parse(String),

    #[error("Invalid forecast URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ForecastError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ForecastError::Timeout
        } else if e.is_decode() {
            ForecastError::Parse(e.to_string())
        } else {
            ForecastError::Network(e)
        }
    }
}

impl ForecastError {
    /// User-friendly error message for display.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => {
                "Too many requests. Please wait a moment and try again.".to_string()
            }
            Self::Timeout => {
                "The connection timed out. Check your network and try again.".to_string()
            }
            Self::Http { status, message } if message.is_empty() => {
                format!("Failed to load forecast data ({}). Please try again.", status)
            }
            Self::Http { status, message } => {
                format!("Failed to load forecast data ({}). {}", status, message)
            }
            Self::Network(_) => {
                "Failed to load forecast data. Check your connection and try again.".to_string()
            }
            Self::Parse(_) | Self::InvalidUrl(_) => {
                "Failed to load forecast data. Please try again.".to_string()
            }
        }
    }

    /// Whether retrying by hand can help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::InvalidUrl(_))
    }
}
