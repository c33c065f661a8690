//! Combines several normalized metrics into one ordered series.

use std::collections::BTreeMap;

use crate::catalog::Metric;
use crate::normalize::normalize;
use crate::types::{ChartPoint, Period, RawForecastResponse};

/// Normalize every metric and merge the points by timestamp.
///
/// Output is sorted ascending by timestamp. A timestamp present in only
/// some metrics keeps only those metrics' keys.
pub fn merge(response: &RawForecastResponse, metrics: &[Metric], period: Period) -> Vec<ChartPoint> {
    match metrics {
        [] => Vec::new(),
        [metric] => normalize(response, *metric, period),
        _ => {
            let mut by_time: BTreeMap<String, ChartPoint> = BTreeMap::new();
            for metric in metrics {
                for point in normalize(response, *metric, period) {
                    match by_time.get_mut(&point.timestamp) {
                        Some(existing) => existing.values.extend(point.values),
                        None => {
                            by_time.insert(point.timestamp.clone(), point);
                        }
                    }
                }
            }
            tracing::debug!(
                metrics = metrics.len(),
                points = by_time.len(),
                "Merged metric series"
            );
            by_time.into_values().collect()
        }
    }
}
