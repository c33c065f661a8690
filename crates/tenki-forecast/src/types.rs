use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Requested forecast window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    /// Next 48 hours, one point per hour
    #[serde(rename = "48h")]
    Hours48,
    /// Next 7 days, one point per day
    #[default]
    #[serde(rename = "7d")]
    Days7,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Hours48, Period::Days7];

    /// Identifier used in preferences, cache keys and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hours48 => "48h",
            Self::Days7 => "7d",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// Value of the `forecast_days` query parameter
    pub fn forecast_days(&self) -> u8 {
        match self {
            Self::Hours48 => 3,
            Self::Days7 => 7,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Hours48 => "48 hours",
            Self::Days7 => "7 days",
        }
    }
}

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 2] = [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }

    /// Label shown next to converted values
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// Wind speed unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WindUnit {
    #[default]
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "m/s")]
    MetersPerSecond,
}

impl WindUnit {
    pub const ALL: [WindUnit; 2] = [WindUnit::KilometersPerHour, WindUnit::MetersPerSecond];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "km/h",
            Self::MetersPerSecond => "m/s",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == s)
    }
}

/// Error for identifiers that do not name a known catalog entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownValueError {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValueError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

macro_rules! impl_from_str {
    ($ty:ty, $kind:literal) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::types::UnknownValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| $crate::types::UnknownValueError::new($kind, s))
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_from_str!(Period, "period");
impl_from_str!(TemperatureUnit, "temperature unit");
impl_from_str!(WindUnit, "wind unit");
pub(crate) use impl_from_str;

/// One `hourly` or `daily` block of an Open-Meteo response.
///
/// Field arrays are kept as raw JSON so that a short array, an explicit
/// `null`, a non-numeric entry and a missing field all read as "no value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastBlock {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl ForecastBlock {
    pub fn new<S: Into<String>>(time: impl IntoIterator<Item = S>) -> Self {
        Self {
            time: time.into_iter().map(Into::into).collect(),
            fields: HashMap::new(),
        }
    }

    /// Attach a field array (builder style, mostly for fixtures)
    pub fn with_field(mut self, name: &str, values: &[Option<f64>]) -> Self {
        self.fields
            .insert(name.to_string(), serde_json::json!(values));
        self
    }

    /// Reading of `field` at `index`, `None` when absent for any reason
    pub fn value_at(&self, field: &str, index: usize) -> Option<f64> {
        self.fields
            .get(field)
            .and_then(serde_json::Value::as_array)
            .and_then(|values| values.get(index))
            .and_then(serde_json::Value::as_f64)
    }
}

/// Forecast API payload, consumed as-is by the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecastResponse {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub hourly: Option<ForecastBlock>,
    #[serde(default)]
    pub daily: Option<ForecastBlock>,
}

/// Values of one point keyed by series display name
pub type SeriesValues = BTreeMap<String, Option<f64>>;

/// Series display name → unit label
pub type SeriesUnitTable = BTreeMap<String, String>;

/// One timestamp's worth of chart values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Raw ISO time (or calendar day), used for ordering and filtering
    pub timestamp: String,
    /// Display label, never compared
    pub label: String,
    pub values: SeriesValues,
}

impl ChartPoint {
    pub fn new(timestamp: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            label: label.into(),
            values: SeriesValues::new(),
        }
    }

    pub fn with_value(mut self, series: impl Into<String>, value: Option<f64>) -> Self {
        self.values.insert(series.into(), value);
        self
    }

    /// `YYYY-MM-DD` part of the timestamp
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

/// Converted points plus the unit of every series that appears in them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub data: Vec<ChartPoint>,
    pub series_units: SeriesUnitTable,
    /// Series names in the order they were first produced
    #[serde(default)]
    pub series: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trips_through_str() {
        for period in Period::ALL {
            assert_eq!(Period::parse(period.as_str()), Some(period));
        }
        assert_eq!(Period::parse("24h"), None);
    }

    #[test]
    fn test_period_forecast_days() {
        assert_eq!(Period::Hours48.forecast_days(), 3);
        assert_eq!(Period::Days7.forecast_days(), 7);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("F".parse::<TemperatureUnit>(), Ok(TemperatureUnit::Fahrenheit));
        assert_eq!("m/s".parse::<WindUnit>(), Ok(WindUnit::MetersPerSecond));
        let err = "K".parse::<TemperatureUnit>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown temperature unit: K");
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&WindUnit::KilometersPerHour).unwrap(), "\"km/h\"");
        assert_eq!(serde_json::to_string(&Period::Hours48).unwrap(), "\"48h\"");
        assert_eq!(serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap(), "\"F\"");
    }

    #[test]
    fn test_block_reads_missing_values_as_none() {
        let raw = serde_json::json!({
            "time": ["2026-01-01T00:00", "2026-01-01T01:00", "2026-01-01T02:00"],
            "temperature_2m": [1.5, null],
            "precipitation": [0.1, "n/a", 0.3]
        });
        let block: ForecastBlock = serde_json::from_value(raw).unwrap();

        assert_eq!(block.value_at("temperature_2m", 0), Some(1.5));
        assert_eq!(block.value_at("temperature_2m", 1), None);
        assert_eq!(block.value_at("temperature_2m", 2), None);
        assert_eq!(block.value_at("precipitation", 1), None);
        assert_eq!(block.value_at("windspeed_10m", 0), None);
    }

    #[test]
    fn test_response_without_blocks_parses() {
        let response: RawForecastResponse =
            serde_json::from_str(r#"{"latitude": 35.7, "longitude": 139.7}"#).unwrap();
        assert!(response.hourly.is_none());
        assert!(response.daily.is_none());
    }

    #[test]
    fn test_chart_point_date_handles_short_timestamps() {
        assert_eq!(ChartPoint::new("2026-03-04T05:00", "").date(), "2026-03-04");
        assert_eq!(ChartPoint::new("2026", "").date(), "2026");
    }
}
