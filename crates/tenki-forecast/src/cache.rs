//! Short-lived in-memory cache of raw forecast responses.
//!
//! Keyed by coordinates rounded to four decimals plus the period, so that
//! flipping back and forth between selections does not hit the API again.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::types::{Period, RawForecastResponse};

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for a location and period, e.g. `35.6762_139.6503_7d`
pub fn cache_key(latitude: f64, longitude: f64, period: Period) -> String {
    format!("{:.4}_{:.4}_{}", latitude, longitude, period.as_str())
}

#[derive(Debug)]
struct CacheEntry {
    data: Arc<RawForecastResponse>,
    stored_at: Instant,
}

#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh entry for `key`, if any. Expired entries are evicted.
    pub fn get(&self, key: &str) -> Option<Arc<RawForecastResponse>> {
        let mut entries = self.entries.lock();
        let lookup = entries
            .get(key)
            .map(|entry| (entry.stored_at.elapsed() < self.ttl, entry.data.clone()));
        match lookup {
            Some((true, data)) => Some(data),
            Some((false, _)) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, data: Arc<RawForecastResponse>) {
        self.entries.lock().insert(
            key,
            CacheEntry {
                data,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop the entry for `key`, forcing its next load to hit the network
    pub fn remove(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
