//! Fixed catalogs of selectable metrics and cities.

use serde::{Deserialize, Serialize};

use crate::types::impl_from_str;

/// Series name for the daily maximum of [`Metric::Temperature`]
pub const MAX_TEMPERATURE_LABEL: &str = "Max temperature";
/// Series name for the daily minimum of [`Metric::Temperature`]
pub const MIN_TEMPERATURE_LABEL: &str = "Min temperature";

/// Where a metric's 7-day values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailySource {
    /// Two daily aggregates rendered as two series
    Pair {
        max_field: &'static str,
        min_field: &'static str,
    },
    /// One daily aggregate field
    Single(&'static str),
    /// No daily field; sampled from the hourly series
    Derived,
}

/// Weather quantity that can be charted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "temperature_2m")]
    Temperature,
    #[serde(rename = "apparent_temperature")]
    ApparentTemperature,
    #[serde(rename = "precipitation")]
    Precipitation,
    #[serde(rename = "windspeed_10m")]
    WindSpeed,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Temperature,
        Metric::ApparentTemperature,
        Metric::Precipitation,
        Metric::WindSpeed,
    ];

    /// Metric shown when nothing (valid) is selected
    pub const DEFAULT: Metric = Metric::Temperature;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Temperature => "temperature_2m",
            Self::ApparentTemperature => "apparent_temperature",
            Self::Precipitation => "precipitation",
            Self::WindSpeed => "windspeed_10m",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Series name used for single-series output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::ApparentTemperature => "Feels like",
            Self::Precipitation => "Precipitation",
            Self::WindSpeed => "Wind speed",
        }
    }

    /// Unit of the values as returned by the API
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Temperature | Self::ApparentTemperature => "°C",
            Self::Precipitation => "mm",
            Self::WindSpeed => "km/h",
        }
    }

    /// Field name inside the `hourly` block
    pub fn hourly_field(&self) -> &'static str {
        self.as_str()
    }

    pub fn daily_source(&self) -> DailySource {
        match self {
            Self::Temperature => DailySource::Pair {
                max_field: "temperature_2m_max",
                min_field: "temperature_2m_min",
            },
            Self::ApparentTemperature => DailySource::Derived,
            Self::Precipitation => DailySource::Single("precipitation_sum"),
            Self::WindSpeed => DailySource::Single("windspeed_10m_max"),
        }
    }

    /// Daily field names requested from the API
    pub fn daily_fields(&self) -> Vec<&'static str> {
        match self.daily_source() {
            DailySource::Pair {
                max_field,
                min_field,
            } => vec![max_field, min_field],
            DailySource::Single(field) => vec![field],
            DailySource::Derived => Vec::new(),
        }
    }

    /// Series names this metric can produce
    pub fn series_labels(&self) -> Vec<&'static str> {
        match self.daily_source() {
            DailySource::Pair { .. } => {
                vec![self.label(), MAX_TEMPERATURE_LABEL, MIN_TEMPERATURE_LABEL]
            }
            DailySource::Single(_) | DailySource::Derived => vec![self.label()],
        }
    }
}

impl_from_str!(Metric, "metric");

/// City with fixed forecast coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Tokyo,
    Osaka,
    Sapporo,
    Fukuoka,
    Naha,
}

impl City {
    pub const ALL: [City; 5] = [
        City::Tokyo,
        City::Osaka,
        City::Sapporo,
        City::Fukuoka,
        City::Naha,
    ];

    pub const DEFAULT: City = City::Tokyo;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tokyo => "tokyo",
            Self::Osaka => "osaka",
            Self::Sapporo => "sapporo",
            Self::Fukuoka => "fukuoka",
            Self::Naha => "naha",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tokyo => "Tokyo",
            Self::Osaka => "Osaka",
            Self::Sapporo => "Sapporo",
            Self::Fukuoka => "Fukuoka",
            Self::Naha => "Naha",
        }
    }

    /// (latitude, longitude)
    pub fn coordinates(&self) -> (f64, f64) {
        match self {
            Self::Tokyo => (35.6762, 139.6503),
            Self::Osaka => (34.6937, 135.5023),
            Self::Sapporo => (43.0618, 141.3545),
            Self::Fukuoka => (33.5902, 130.4017),
            Self::Naha => (26.2124, 127.6792),
        }
    }
}

impl_from_str!(City, "city");

impl Default for City {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Non-empty list of metrics to chart.
///
/// An empty selection is replaced by [`Metric::DEFAULT`]; duplicates are
/// dropped keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricSelection(Vec<Metric>);

impl MetricSelection {
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Self {
        let mut selected = Vec::new();
        for metric in metrics {
            if !selected.contains(&metric) {
                selected.push(metric);
            }
        }
        if selected.is_empty() {
            selected.push(Metric::DEFAULT);
        }
        Self(selected)
    }

    pub fn as_slice(&self) -> &[Metric] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self(vec![Metric::DEFAULT])
    }
}
