//! Forecast pipeline for Tenki
//!
//! Fetches Open-Meteo forecasts and turns them into aligned, unit-converted
//! chart series for a fixed set of cities.

pub mod cache;
pub mod catalog;
pub mod convert;
pub mod error;
pub mod filter;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod sequencer;
pub mod service;
pub mod types;
pub mod units;

pub use cache::ResponseCache;
pub use catalog::{City, DailySource, Metric, MetricSelection};
pub use convert::apply_units;
pub use error::ForecastError;
pub use filter::{filter_from, today_in};
pub use merge::merge;
pub use normalize::normalize;
pub use pipeline::{build_chart, ChartRequest, ChartView};
pub use provider::ForecastProvider;
pub use sequencer::{RequestSequencer, RequestToken};
pub use service::{ForecastService, LoadOutcome};
pub use types::*;
