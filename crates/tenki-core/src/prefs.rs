//! Persisted user preferences (`prefs.json`).
//!
//! Loading never fails. Every field is checked on its own and an invalid or
//! missing value falls back to its default, so a half-broken file still keeps
//! whatever was valid in it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tenki_forecast::{City, Metric, MetricSelection, Period, TemperatureUnit, WindUnit};

/// The user's last chart settings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedPrefs {
    pub city: City,
    pub metrics: MetricSelection,
    pub period: Period,
    pub temp_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
}

/// On-disk shape
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrefsFile {
    city_id: City,
    metric_ids: Vec<Metric>,
    period: Period,
    temp_unit: TemperatureUnit,
    wind_unit: WindUnit,
}

impl From<&SavedPrefs> for PrefsFile {
    fn from(prefs: &SavedPrefs) -> Self {
        Self {
            city_id: prefs.city,
            metric_ids: prefs.metrics.as_slice().to_vec(),
            period: prefs.period,
            temp_unit: prefs.temp_unit,
            wind_unit: prefs.wind_unit,
        }
    }
}

fn ensure_city(value: Option<&Value>) -> City {
    match value.and_then(Value::as_str).and_then(City::parse) {
        Some(city) => city,
        None => {
            warn_invalid("cityId", value);
            City::DEFAULT
        }
    }
}

fn ensure_metric_ids(value: Option<&Value>) -> MetricSelection {
    let Some(ids) = value.and_then(Value::as_array) else {
        warn_invalid("metricIds", value);
        return MetricSelection::default();
    };

    let metrics: Vec<Metric> = ids
        .iter()
        .filter_map(|id| {
            let metric = id.as_str().and_then(Metric::parse);
            if metric.is_none() {
                tracing::warn!("Dropping unknown metric id from preferences: {}", id);
            }
            metric
        })
        .collect();

    MetricSelection::new(metrics)
}

fn ensure_period(value: Option<&Value>) -> Period {
    match value.and_then(Value::as_str).and_then(Period::parse) {
        Some(period) => period,
        None => {
            warn_invalid("period", value);
            Period::default()
        }
    }
}

fn ensure_temp_unit(value: Option<&Value>) -> TemperatureUnit {
    match value.and_then(Value::as_str).and_then(TemperatureUnit::parse) {
        Some(unit) => unit,
        None => {
            warn_invalid("tempUnit", value);
            TemperatureUnit::default()
        }
    }
}

fn ensure_wind_unit(value: Option<&Value>) -> WindUnit {
    match value.and_then(Value::as_str).and_then(WindUnit::parse) {
        Some(unit) => unit,
        None => {
            warn_invalid("windUnit", value);
            WindUnit::default()
        }
    }
}

fn warn_invalid(field: &str, value: Option<&Value>) {
    // missing keys fall back silently
    if let Some(value) = value {
        tracing::warn!("Invalid {} in preferences ({}), using default", field, value);
    }
}

impl SavedPrefs {
    /// Build preferences from arbitrary JSON, field by field
    pub fn from_json(value: &Value) -> Self {
        Self {
            city: ensure_city(value.get("cityId")),
            metrics: ensure_metric_ids(value.get("metricIds")),
            period: ensure_period(value.get("period")),
            temp_unit: ensure_temp_unit(value.get("tempUnit")),
            wind_unit: ensure_wind_unit(value.get("windUnit")),
        }
    }
}

/// File-backed preference store
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored preferences, falling back to defaults
    pub fn load(&self) -> SavedPrefs {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read preferences at {:?}: {}", self.path, e);
                }
                return SavedPrefs::default();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(value) => SavedPrefs::from_json(&value),
            Err(e) => {
                tracing::warn!("Corrupt preferences at {:?}: {}", self.path, e);
                SavedPrefs::default()
            }
        }
    }

    /// Write preferences as pretty JSON
    pub fn save(&self, prefs: &SavedPrefs) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create preferences directory")?;
        }

        let json = serde_json::to_string_pretty(&PrefsFile::from(prefs))
            .context("Failed to serialize preferences")?;

        fs::write(&self.path, json).context("Failed to write preferences file")?;

        tracing::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_in(dir: &tempfile::TempDir) -> PrefsStore {
        PrefsStore::new(dir.path().join("tenki").join("prefs.json"))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir).load();

        assert_eq!(prefs, SavedPrefs::default());
        assert_eq!(prefs.city, City::Tokyo);
        assert_eq!(prefs.metrics.as_slice(), &[Metric::Temperature]);
        assert_eq!(prefs.period, Period::Days7);
        assert_eq!(prefs.temp_unit, TemperatureUnit::Celsius);
        assert_eq!(prefs.wind_unit, WindUnit::KilometersPerHour);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert_eq!(store.load(), SavedPrefs::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let prefs = SavedPrefs {
            city: City::Naha,
            metrics: MetricSelection::new([Metric::WindSpeed, Metric::Precipitation]),
            period: Period::Hours48,
            temp_unit: TemperatureUnit::Fahrenheit,
            wind_unit: WindUnit::MetersPerSecond,
        };

        store.save(&prefs).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "cityId": "naha",
                "metricIds": ["windspeed_10m", "precipitation"],
                "period": "48h",
                "tempUnit": "F",
                "windUnit": "m/s"
            })
        );
        assert_eq!(store.load(), prefs);
    }

    #[test]
    fn test_each_field_falls_back_independently() {
        let prefs = SavedPrefs::from_json(&json!({
            "cityId": "atlantis",
            "metricIds": ["precipitation"],
            "period": "1y",
            "tempUnit": "F",
            "windUnit": 42
        }));

        assert_eq!(prefs.city, City::Tokyo);
        assert_eq!(prefs.metrics.as_slice(), &[Metric::Precipitation]);
        assert_eq!(prefs.period, Period::Days7);
        assert_eq!(prefs.temp_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.wind_unit, WindUnit::KilometersPerHour);
    }

    #[test]
    fn test_unknown_metric_ids_dropped() {
        let prefs = SavedPrefs::from_json(&json!({
            "metricIds": ["snowfall", "apparent_temperature", 7]
        }));
        assert_eq!(prefs.metrics.as_slice(), &[Metric::ApparentTemperature]);

        let prefs = SavedPrefs::from_json(&json!({ "metricIds": ["snowfall"] }));
        assert_eq!(prefs.metrics.as_slice(), &[Metric::Temperature]);

        let prefs = SavedPrefs::from_json(&json!({ "metricIds": "temperature_2m" }));
        assert_eq!(prefs.metrics.as_slice(), &[Metric::Temperature]);
    }

    #[test]
    fn test_non_object_json_gives_defaults() {
        assert_eq!(SavedPrefs::from_json(&json!([1, 2, 3])), SavedPrefs::default());
    }
}
