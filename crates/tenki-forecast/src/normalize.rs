//! Turns one metric of a raw forecast response into chart points.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::catalog::{DailySource, Metric, MAX_TEMPERATURE_LABEL, MIN_TEMPERATURE_LABEL};
use crate::types::{ChartPoint, ForecastBlock, Period, RawForecastResponse};

/// Points kept for the 48-hour window
pub const HOURLY_POINT_LIMIT: usize = 48;
/// Points kept when daily values are sampled from hourly data
pub const DAILY_POINT_LIMIT: usize = 7;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// `M/D H:00` for an hourly timestamp; the raw string if it does not parse
pub fn hourly_label(timestamp: &str) -> String {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .map(|dt| format!("{}/{} {}:00", dt.month(), dt.day(), dt.hour()))
        .unwrap_or_else(|| timestamp.to_string())
}

/// `M/D` for a daily or hourly timestamp; the raw string if it does not parse
pub fn daily_label(timestamp: &str) -> String {
    timestamp
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(|date| format!("{}/{}", date.month(), date.day()))
        .unwrap_or_else(|| timestamp.to_string())
}

/// Normalize one metric of `response` for `period`.
///
/// Missing blocks give an empty series; missing or short arrays give
/// `None` values. Never fails.
pub fn normalize(response: &RawForecastResponse, metric: Metric, period: Period) -> Vec<ChartPoint> {
    match period {
        Period::Hours48 => response
            .hourly
            .as_ref()
            .map(|hourly| hourly_points(hourly, metric))
            .unwrap_or_default(),
        Period::Days7 => {
            let Some(daily) = response.daily.as_ref() else {
                return Vec::new();
            };
            match metric.daily_source() {
                DailySource::Pair {
                    max_field,
                    min_field,
                } => daily_pair_points(daily, max_field, min_field),
                DailySource::Single(field) => daily_points(daily, field, metric.label()),
                DailySource::Derived => response
                    .hourly
                    .as_ref()
                    .map(|hourly| derived_daily_points(hourly, metric))
                    .unwrap_or_default(),
            }
        }
    }
}

fn hourly_points(hourly: &ForecastBlock, metric: Metric) -> Vec<ChartPoint> {
    hourly
        .time
        .iter()
        .take(HOURLY_POINT_LIMIT)
        .enumerate()
        .map(|(i, time)| {
            ChartPoint::new(time.as_str(), hourly_label(time))
                .with_value(metric.label(), hourly.value_at(metric.hourly_field(), i))
        })
        .collect()
}

fn daily_pair_points(daily: &ForecastBlock, max_field: &str, min_field: &str) -> Vec<ChartPoint> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            ChartPoint::new(time.as_str(), daily_label(time))
                .with_value(MAX_TEMPERATURE_LABEL, daily.value_at(max_field, i))
                .with_value(MIN_TEMPERATURE_LABEL, daily.value_at(min_field, i))
        })
        .collect()
}

fn daily_points(daily: &ForecastBlock, field: &str, label: &str) -> Vec<ChartPoint> {
    daily
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            ChartPoint::new(time.as_str(), daily_label(time)).with_value(label, daily.value_at(field, i))
        })
        .collect()
}

/// First hourly reading of each calendar day, keyed by the day itself so it
/// lines up with real daily series when merged.
fn derived_daily_points(hourly: &ForecastBlock, metric: Metric) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = Vec::new();
    for (i, time) in hourly.time.iter().enumerate() {
        let day = time.get(..10).unwrap_or(time);
        if points.last().is_some_and(|p| p.timestamp == day) {
            continue;
        }
        if points.len() == DAILY_POINT_LIMIT {
            break;
        }
        points.push(
            ChartPoint::new(day, daily_label(time))
                .with_value(metric.label(), hourly.value_at(metric.hourly_field(), i)),
        );
    }
    points
}
