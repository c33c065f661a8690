//! Raw response → chart-ready data.

use serde::Serialize;

use crate::catalog::MetricSelection;
use crate::convert::apply_units;
use crate::filter::{filter_from, from_date_label};
use crate::merge::merge;
use crate::types::{ChartData, ChartPoint, Period, RawForecastResponse, SeriesUnitTable, TemperatureUnit, WindUnit};

/// Everything that shapes one chart besides the response itself
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRequest {
    pub metrics: MetricSelection,
    pub period: Period,
    pub temp_unit: TemperatureUnit,
    pub wind_unit: WindUnit,
}

/// Run merge, date filter and unit conversion for `request`.
///
/// `reference_date` is today's `YYYY-MM-DD` in the reference zone.
pub fn build_chart(response: &RawForecastResponse, request: &ChartRequest, reference_date: &str) -> ChartData {
    let metrics = request.metrics.as_slice();
    let merged = merge(response, metrics, request.period);
    let merged_len = merged.len();
    let filtered = filter_from(merged, reference_date);
    tracing::debug!(
        merged = merged_len,
        kept = filtered.len(),
        reference_date,
        "Filtered chart points"
    );
    apply_units(filtered, metrics, request.temp_unit, request.wind_unit)
}

/// Payload handed to a rendering surface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub data: Vec<ChartPoint>,
    pub period: Period,
    pub series_units: SeriesUnitTable,
    /// Legend and column order
    pub series: Vec<String>,
    pub from_date: String,
}

impl ChartView {
    pub fn new(chart: ChartData, period: Period, reference_date: &str) -> Self {
        Self {
            data: chart.data,
            period,
            series_units: chart.series_units,
            series: chart.series,
            from_date: from_date_label(reference_date),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Metric;
    use crate::types::ForecastBlock;

    fn sample_response() -> RawForecastResponse {
        RawForecastResponse {
            hourly: Some(
                ForecastBlock::new([
                    "2026-04-30T22:00",
                    "2026-04-30T23:00",
                    "2026-05-01T00:00",
                    "2026-05-01T01:00",
                ])
                .with_field("temperature_2m", &[Some(9.0), Some(8.0), Some(0.0), Some(100.0)])
                .with_field("windspeed_10m", &[Some(3.6), Some(7.2), Some(36.0), None]),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_pipeline_hourly() {
        let request = ChartRequest {
            metrics: MetricSelection::new([Metric::Temperature, Metric::WindSpeed]),
            period: Period::Hours48,
            temp_unit: TemperatureUnit::Fahrenheit,
            wind_unit: WindUnit::MetersPerSecond,
        };

        let chart = build_chart(&sample_response(), &request, "2026-05-01");

        assert_eq!(chart.data.len(), 2);
        assert_eq!(chart.data[0].label, "5/1 0:00");
        assert_eq!(chart.data[0].values["Temperature"], Some(32.0));
        assert_eq!(chart.data[0].values["Wind speed"], Some(10.0));
        assert_eq!(chart.data[1].values["Temperature"], Some(212.0));
        assert_eq!(chart.data[1].values["Wind speed"], None);
        assert_eq!(chart.series_units["Temperature"], "°F");
        assert_eq!(chart.series_units["Wind speed"], "m/s");
        assert_eq!(chart.series, vec!["Temperature", "Wind speed"]);
    }

    #[test]
    fn test_everything_in_the_past_is_empty_state() {
        let request = ChartRequest {
            period: Period::Hours48,
            ..Default::default()
        };

        let chart = build_chart(&sample_response(), &request, "2026-06-01");

        assert!(chart.data.is_empty());
        assert!(chart.series_units.is_empty());
    }

    #[test]
    fn test_empty_selection_charts_default_metric() {
        let request = ChartRequest {
            metrics: MetricSelection::new(Vec::new()),
            period: Period::Hours48,
            ..Default::default()
        };

        let chart = build_chart(&sample_response(), &request, "2026-04-30");

        assert_eq!(chart.data.len(), 4);
        assert!(chart.data.iter().all(|p| p.values.contains_key("Temperature")));
        assert_eq!(chart.series_units.len(), 1);
    }

    #[test]
    fn test_chart_view_carries_from_date() {
        let request = ChartRequest {
            period: Period::Hours48,
            ..Default::default()
        };
        let chart = build_chart(&sample_response(), &request, "2026-05-01");

        let view = ChartView::new(chart, Period::Hours48, "2026-05-01");

        assert_eq!(view.from_date, "5/1 (today)");
        assert_eq!(view.period, Period::Hours48);
        assert_eq!(view.data.len(), 2);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["period"], "48h");
        assert_eq!(json["series_units"]["Temperature"], "°C");
    }
}
