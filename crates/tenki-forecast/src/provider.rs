//! Open-Meteo forecast client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use crate::catalog::{City, Metric};
use crate::error::ForecastError;
use crate::types::{Period, RawForecastResponse};

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    base_url: String,
    timezone: String,
}

impl ForecastProvider {
    pub fn new(base_url: &str, request_timeout: Duration, timezone: &str) -> Result<Self, ForecastError> {
        let client = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.to_string(),
            timezone: timezone.to_string(),
        })
    }

    /// Full request URL for a location and period
    pub fn forecast_url(&self, latitude: f64, longitude: f64, period: Period) -> Result<Url, ForecastError> {
        let hourly = Metric::ALL
            .iter()
            .map(Metric::hourly_field)
            .collect::<Vec<_>>()
            .join(",");
        let daily = Metric::ALL
            .iter()
            .flat_map(Metric::daily_fields)
            .collect::<Vec<_>>()
            .join(",");

        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("hourly", hourly),
                ("daily", daily),
                ("forecast_days", period.forecast_days().to_string()),
                ("timezone", self.timezone.clone()),
            ],
        )?;
        Ok(url)
    }

    /// Fetch the forecast for one of the catalog cities.
    pub async fn fetch(&self, city: City, period: Period) -> Result<RawForecastResponse, ForecastError> {
        let (latitude, longitude) = city.coordinates();
        self.fetch_at(latitude, longitude, period).await
    }

    /// Fetch the forecast for arbitrary coordinates. One GET, no retry.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_at(
        &self,
        latitude: f64,
        longitude: f64,
        period: Period,
    ) -> Result<RawForecastResponse, ForecastError> {
        let url = self.forecast_url(latitude, longitude, period)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            let body: RawForecastResponse = response.json().await?;
            tracing::info!(
                hourly = body.hourly.as_ref().map_or(0, |b| b.time.len()),
                daily = body.daily.as_ref().map_or(0, |b| b.time.len()),
                "Forecast fetched"
            );
            Ok(body)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Forecast provider rate limited the request");
            Err(ForecastError::RateLimited)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                text
            };
            tracing::warn!("Forecast request failed with status {}", status);
            Err(ForecastError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}
