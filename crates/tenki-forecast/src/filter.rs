//! Drops points dated before "today" in a fixed reference zone.
//!
//! The forecast API has no start-date parameter and may return a partial
//! leading day that is already over in the reference zone.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::types::ChartPoint;

/// Zone "today" is computed in unless configured otherwise
pub const DEFAULT_REFERENCE_ZONE: Tz = chrono_tz::Asia::Tokyo;

/// Keep points whose `YYYY-MM-DD` date is on or after `reference_date`
pub fn filter_from(points: Vec<ChartPoint>, reference_date: &str) -> Vec<ChartPoint> {
    points
        .into_iter()
        .filter(|point| point.date() >= reference_date)
        .collect()
}

/// Today's date in `zone` as `YYYY-MM-DD`
pub fn today_in(zone: Tz) -> String {
    date_in(Utc::now(), zone)
}

/// Date of the instant `now` in `zone` as `YYYY-MM-DD`
pub fn date_in(now: DateTime<Utc>, zone: Tz) -> String {
    now.with_timezone(&zone).format("%Y-%m-%d").to_string()
}

/// Display form of the reference date, e.g. `5/1 (today)`
pub fn from_date_label(reference_date: &str) -> String {
    match NaiveDate::parse_from_str(reference_date, "%Y-%m-%d") {
        Ok(date) => format!("{}/{} (today)", date.month(), date.day()),
        Err(_) => format!("{} (today)", reference_date),
    }
}
