use serde::{Deserialize, Serialize};

use crate::icon::IconCategory;

/// A position on the globe, produced by geolocation or the fixed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinates used when live geolocation is denied or fails (Delhi).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 28.67,
    longitude: 77.22,
};

/// The most recently fetched weather record for a cycle.
///
/// Every successful fetch builds a fresh snapshot that fully replaces the
/// previous one; nothing is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    /// Raw condition label from the provider, e.g. "Haze" or "Clouds".
    pub condition: String,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub humidity_pct: u8,
    pub visibility_km: i32,
    pub wind_speed: i32,
    /// Provider icon id, e.g. "50d".
    pub icon_id: String,
    pub icon: IconCategory,
}

/// Derived Fahrenheit reading, rounded from the raw Celsius value.
pub fn fahrenheit_from_celsius(celsius: f64) -> i32 {
    (celsius * 1.8 + 32.0).round() as i32
}

/// Failed city search, rendered in place of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchError {
    pub attempted_query: String,
    pub message: String,
}

impl SearchError {
    pub fn not_found(attempted_query: impl Into<String>) -> Self {
        Self {
            attempted_query: attempted_query.into(),
            message: "Not Found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_is_rounded_from_raw_celsius() {
        assert_eq!(fahrenheit_from_celsius(20.0), 68);
        assert_eq!(fahrenheit_from_celsius(31.4), 89);
        assert_eq!(fahrenheit_from_celsius(-5.2), 23);
    }

    #[test]
    fn fallback_coordinates_point_at_delhi() {
        assert_eq!(FALLBACK_COORDINATES.latitude, 28.67);
        assert_eq!(FALLBACK_COORDINATES.longitude, 77.22);
    }

    #[test]
    fn search_error_carries_query_and_fixed_message() {
        let err = SearchError::not_found("Zzqqxx");
        assert_eq!(err.attempted_query, "Zzqqxx");
        assert_eq!(err.message, "Not Found");
    }
}
