//! Pure display mapping: condition label to icon category, date to long form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display icon category derived from the provider's condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IconCategory {
    #[default]
    ClearDay,
    Cloudy,
    Rain,
    Snow,
    Wind,
    Sleet,
    Fog,
}

impl IconCategory {
    /// Total mapping over condition labels. Anything outside the table,
    /// including an empty label, falls back to `ClearDay`.
    pub fn from_condition(condition: &str) -> Self {
        match condition {
            "Haze" | "Clear" => IconCategory::ClearDay,
            "Clouds" => IconCategory::Cloudy,
            "Rain" => IconCategory::Rain,
            "Snow" => IconCategory::Snow,
            "Dust" | "Tornado" => IconCategory::Wind,
            "Drizzle" => IconCategory::Sleet,
            "Fog" | "Smoke" => IconCategory::Fog,
            _ => IconCategory::ClearDay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconCategory::ClearDay => "CLEAR_DAY",
            IconCategory::Cloudy => "CLOUDY",
            IconCategory::Rain => "RAIN",
            IconCategory::Snow => "SNOW",
            IconCategory::Wind => "WIND",
            IconCategory::Sleet => "SLEET",
            IconCategory::Fog => "FOG",
        }
    }

    /// Terminal glyph for the category.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconCategory::ClearDay => "☀",
            IconCategory::Cloudy => "☁",
            IconCategory::Rain => "🌧",
            IconCategory::Snow => "❄",
            IconCategory::Wind => "💨",
            IconCategory::Sleet => "🌦",
            IconCategory::Fog => "🌫",
        }
    }

    pub const fn all() -> &'static [IconCategory] {
        &[
            IconCategory::ClearDay,
            IconCategory::Cloudy,
            IconCategory::Rain,
            IconCategory::Snow,
            IconCategory::Wind,
            IconCategory::Sleet,
            IconCategory::Fog,
        ]
    }
}

impl std::fmt::Display for IconCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "{Weekday}, {day} {Month} {year}" with full English names.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}
