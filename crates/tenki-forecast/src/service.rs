//! Forecast loading: cache, load timeout and request sequencing around the
//! provider.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::cache::{cache_key, ResponseCache};
use crate::catalog::City;
use crate::error::ForecastError;
use crate::provider::ForecastProvider;
use crate::sequencer::{RequestSequencer, RequestToken};
use crate::types::{Period, RawForecastResponse};

/// Upper bound for a whole load, independent of the HTTP client timeout
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(12);

/// Result of one load attempt
#[derive(Debug)]
pub enum LoadOutcome {
    /// This load is still the latest one; its result should be applied
    Ready(Result<Arc<RawForecastResponse>, ForecastError>),
    /// A newer load started before this one finished; drop the result
    Superseded,
}

impl LoadOutcome {
    /// The result, unless the load was superseded
    pub fn into_result(self) -> Option<Result<Arc<RawForecastResponse>, ForecastError>> {
        match self {
            Self::Ready(result) => Some(result),
            Self::Superseded => None,
        }
    }
}

#[derive(Debug)]
pub struct ForecastService {
    provider: ForecastProvider,
    cache: ResponseCache,
    sequencer: RequestSequencer,
    load_timeout: Duration,
}

impl ForecastService {
    pub fn new(provider: ForecastProvider, cache_ttl: Duration, load_timeout: Duration) -> Self {
        Self {
            provider,
            cache: ResponseCache::new(cache_ttl),
            sequencer: RequestSequencer::new(),
            load_timeout,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Load the forecast for `city`, using the cache when fresh.
    #[instrument(skip(self), level = "info")]
    pub async fn load(&self, city: City, period: Period) -> LoadOutcome {
        let token = self.sequencer.issue();
        let key = Self::key_for(city, period);

        let result = match self.cache.get(&key) {
            Some(data) => {
                tracing::info!("Using cached forecast for {}", key);
                Ok(data)
            }
            None => self.fetch_with_timeout(city, period, key).await,
        };

        self.settle(token, result)
    }

    /// Load bypassing the cached response for this city and period (manual refresh).
    pub async fn refresh(&self, city: City, period: Period) -> LoadOutcome {
        let key = Self::key_for(city, period);
        if self.cache.remove(&key) {
            tracing::debug!("Dropped cached forecast for {}", key);
        }
        self.load(city, period).await
    }

    fn key_for(city: City, period: Period) -> String {
        let (latitude, longitude) = city.coordinates();
        cache_key(latitude, longitude, period)
    }

    async fn fetch_with_timeout(
        &self,
        city: City,
        period: Period,
        key: String,
    ) -> Result<Arc<RawForecastResponse>, ForecastError> {
        let fetch = self.provider.fetch(city, period);
        match tokio::time::timeout(self.load_timeout, fetch).await {
            Ok(Ok(response)) => {
                let response = Arc::new(response);
                self.cache.insert(key, response.clone());
                Ok(response)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                tracing::warn!("Forecast load exceeded {:?}", self.load_timeout);
                Err(ForecastError::Timeout)
            }
        }
    }

    fn settle(
        &self,
        token: RequestToken,
        result: Result<Arc<RawForecastResponse>, ForecastError>,
    ) -> LoadOutcome {
        if self.sequencer.is_current(token) {
            LoadOutcome::Ready(result)
        } else {
            tracing::debug!(token = token.id(), "Discarding superseded forecast load");
            LoadOutcome::Superseded
        }
    }
}
