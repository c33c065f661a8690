use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;
use tenki_core::SavedPrefs;
use tenki_forecast::{City, Metric, MetricSelection, Period, TemperatureUnit, WindUnit};

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-metric weather forecast charts for Japanese cities", long_about = None)]
pub struct Cli {
    /// City to forecast (tokyo, osaka, sapporo, fukuoka, naha)
    #[arg(long)]
    pub city: Option<City>,

    /// Metric to chart; repeat to overlay several
    /// (temperature_2m, apparent_temperature, precipitation, windspeed_10m)
    #[arg(long = "metric", action = ArgAction::Append)]
    pub metrics: Vec<Metric>,

    /// Forecast window (48h or 7d)
    #[arg(long)]
    pub period: Option<Period>,

    /// Temperature unit (C or F)
    #[arg(long)]
    pub temp_unit: Option<TemperatureUnit>,

    /// Wind speed unit (km/h or m/s)
    #[arg(long)]
    pub wind_unit: Option<WindUnit>,

    /// Print the chart as JSON instead of a table
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Ignore cached responses and fetch again
    #[arg(long, action = ArgAction::SetTrue)]
    pub refresh: bool,

    /// Config file (defaults to <config dir>/tenki/config.toml)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Stored preferences with any flags given on the command line applied
    pub fn apply_to(&self, prefs: &SavedPrefs) -> SavedPrefs {
        let metrics = if self.metrics.is_empty() {
            prefs.metrics.clone()
        } else {
            MetricSelection::new(self.metrics.iter().copied())
        };

        SavedPrefs {
            city: self.city.unwrap_or(prefs.city),
            metrics,
            period: self.period.unwrap_or(prefs.period),
            temp_unit: self.temp_unit.unwrap_or(prefs.temp_unit),
            wind_unit: self.wind_unit.unwrap_or(prefs.wind_unit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_prefs() {
        let cli = Cli::try_parse_from(["tenki"]).unwrap();
        let stored = SavedPrefs {
            city: City::Osaka,
            metrics: MetricSelection::new([Metric::Precipitation]),
            ..SavedPrefs::default()
        };

        assert_eq!(cli.apply_to(&stored), stored);
        assert!(!cli.json);
        assert!(!cli.refresh);
    }

    #[test]
    fn test_flags_override_prefs() {
        let cli = Cli::try_parse_from([
            "tenki",
            "--city",
            "naha",
            "--metric",
            "windspeed_10m",
            "--metric",
            "temperature_2m",
            "--period",
            "48h",
            "--temp-unit",
            "F",
            "--wind-unit",
            "m/s",
            "--json",
        ])
        .unwrap();

        let prefs = cli.apply_to(&SavedPrefs::default());

        assert_eq!(prefs.city, City::Naha);
        assert_eq!(prefs.metrics.as_slice(), &[Metric::WindSpeed, Metric::Temperature]);
        assert_eq!(prefs.period, Period::Hours48);
        assert_eq!(prefs.temp_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.wind_unit, WindUnit::MetersPerSecond);
        assert!(cli.json);
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(Cli::try_parse_from(["tenki", "--city", "kyoto"]).is_err());
        assert!(Cli::try_parse_from(["tenki", "--metric", "snowfall"]).is_err());
        assert!(Cli::try_parse_from(["tenki", "--period", "1y"]).is_err());
    }
}
