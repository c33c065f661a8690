//! Unit-conversion pass over merged chart points.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::catalog::Metric;
use crate::types::{ChartData, ChartPoint, SeriesUnitTable, TemperatureUnit, WindUnit};
use crate::units::{convert_value, display_unit_for};

/// Series name → metric, built once from the catalog
static LABEL_TO_METRIC: Lazy<HashMap<&'static str, Metric>> = Lazy::new(|| {
    Metric::ALL
        .iter()
        .flat_map(|metric| metric.series_labels().into_iter().map(move |label| (label, *metric)))
        .collect()
});

/// Metric a series name belongs to, if it is a catalog label
pub fn metric_for_label(label: &str) -> Option<Metric> {
    LABEL_TO_METRIC.get(label).copied()
}

/// Convert every value to the selected units and collect the unit of each
/// series.
///
/// Series names that are not catalog labels are treated as the first
/// selected metric.
pub fn apply_units(
    points: Vec<ChartPoint>,
    metrics: &[Metric],
    temp_unit: TemperatureUnit,
    wind_unit: WindUnit,
) -> ChartData {
    let fallback = metrics.first().copied().unwrap_or(Metric::DEFAULT);
    let mut series_units = SeriesUnitTable::new();

    let data = points
        .into_iter()
        .map(|mut point| {
            for (name, value) in point.values.iter_mut() {
                let metric = metric_for_label(name).unwrap_or_else(|| {
                    tracing::debug!(series = %name, fallback = fallback.as_str(), "Unknown series label");
                    fallback
                });
                series_units
                    .entry(name.clone())
                    .or_insert_with(|| display_unit_for(metric, temp_unit, wind_unit).to_string());
                *value = convert_value(metric, *value, temp_unit, wind_unit);
            }
            point
        })
        .collect();

    let series = series_order(metrics, &series_units);

    ChartData {
        data,
        series_units,
        series,
    }
}

/// Selected metrics' labels in selection order, then any other series
fn series_order(metrics: &[Metric], series_units: &SeriesUnitTable) -> Vec<String> {
    let mut series: Vec<String> = Vec::new();
    for label in metrics.iter().flat_map(|metric| metric.series_labels()) {
        if series_units.contains_key(label) && !series.iter().any(|s| s == label) {
            series.push(label.to_string());
        }
    }
    for name in series_units.keys() {
        if !series.contains(name) {
            series.push(name.clone());
        }
    }
    series
}
