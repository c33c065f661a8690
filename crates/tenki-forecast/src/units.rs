//! Unit conversion for display.
//!
//! The API always answers in °C, mm and km/h; everything here maps those
//! base values to the units the user picked.

use crate::catalog::Metric;
use crate::types::{TemperatureUnit, WindUnit};

/// Convert a Celsius reading. Fahrenheit values are rounded to whole degrees.
pub fn convert_temperature(celsius: Option<f64>, unit: TemperatureUnit) -> Option<f64> {
    let celsius = celsius?;
    match unit {
        TemperatureUnit::Celsius => Some(celsius),
        TemperatureUnit::Fahrenheit => Some((celsius * 9.0 / 5.0 + 32.0).round()),
    }
}

/// Convert a km/h reading. m/s values are rounded to one decimal place.
pub fn convert_wind(kph: Option<f64>, unit: WindUnit) -> Option<f64> {
    let kph = kph?;
    match unit {
        WindUnit::KilometersPerHour => Some(kph),
        WindUnit::MetersPerSecond => Some((kph / 3.6 * 10.0).round() / 10.0),
    }
}

/// Precipitation is never shown below zero
pub fn clamp_precipitation(mm: f64) -> f64 {
    mm.max(0.0)
}

/// Unit label for a metric under the current preferences
pub fn display_unit_for(
    metric: Metric,
    temp_unit: TemperatureUnit,
    wind_unit: WindUnit,
) -> &'static str {
    match metric {
        Metric::Temperature | Metric::ApparentTemperature => temp_unit.symbol(),
        Metric::WindSpeed => wind_unit.as_str(),
        Metric::Precipitation => metric.base_unit(),
    }
}

/// Display value of one raw reading of `metric`
pub fn convert_value(
    metric: Metric,
    value: Option<f64>,
    temp_unit: TemperatureUnit,
    wind_unit: WindUnit,
) -> Option<f64> {
    match metric {
        Metric::Temperature | Metric::ApparentTemperature => convert_temperature(value, temp_unit),
        Metric::WindSpeed => convert_wind(value, wind_unit),
        Metric::Precipitation => value.map(clamp_precipitation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_propagates() {
        for unit in TemperatureUnit::ALL {
            assert_eq!(convert_temperature(None, unit), None);
        }
        for unit in WindUnit::ALL {
            assert_eq!(convert_wind(None, unit), None);
        }
    }

    #[test]
    fn test_identity_conversions() {
        for x in [-40.5, 0.0, 12.34, 1e6] {
            assert_eq!(convert_temperature(Some(x), TemperatureUnit::Celsius), Some(x));
            assert_eq!(convert_wind(Some(x), WindUnit::KilometersPerHour), Some(x));
        }
    }

    #[test]
    fn test_fahrenheit() {
        assert_eq!(convert_temperature(Some(0.0), TemperatureUnit::Fahrenheit), Some(32.0));
        assert_eq!(convert_temperature(Some(100.0), TemperatureUnit::Fahrenheit), Some(212.0));
        assert_eq!(convert_temperature(Some(-40.0), TemperatureUnit::Fahrenheit), Some(-40.0));
        // 21.3 °C = 70.34 °F
        assert_eq!(convert_temperature(Some(21.3), TemperatureUnit::Fahrenheit), Some(70.0));
    }

    #[test]
    fn test_meters_per_second() {
        assert_eq!(convert_wind(Some(36.0), WindUnit::MetersPerSecond), Some(10.0));
        // 10 km/h = 2.777... m/s
        assert_eq!(convert_wind(Some(10.0), WindUnit::MetersPerSecond), Some(2.8));
    }

    #[test]
    fn test_precipitation_never_negative() {
        for v in [-0.1, -5.0, 0.0, 0.2, 12.0] {
            assert_eq!(clamp_precipitation(v), v.max(0.0));
            assert_eq!(
                convert_value(
                    Metric::Precipitation,
                    Some(v),
                    TemperatureUnit::Fahrenheit,
                    WindUnit::MetersPerSecond
                ),
                Some(v.max(0.0))
            );
        }
        assert_eq!(
            convert_value(
                Metric::Precipitation,
                None,
                TemperatureUnit::Celsius,
                WindUnit::KilometersPerHour
            ),
            None
        );
    }

    #[test]
    fn test_display_units() {
        let (c, f) = (TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit);
        let (kmh, ms) = (WindUnit::KilometersPerHour, WindUnit::MetersPerSecond);

        assert_eq!(display_unit_for(Metric::Temperature, c, kmh), "°C");
        assert_eq!(display_unit_for(Metric::ApparentTemperature, f, kmh), "°F");
        assert_eq!(display_unit_for(Metric::WindSpeed, f, ms), "m/s");
        assert_eq!(display_unit_for(Metric::WindSpeed, c, kmh), "km/h");
        assert_eq!(display_unit_for(Metric::Precipitation, f, ms), "mm");
    }
}
