use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::WeatherError,
    icon::IconCategory,
    model::{Coordinates, WeatherSnapshot, fahrenheit_from_celsius},
};

use super::WeatherProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the OpenWeather current-conditions endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(base_url: String, api_key: String) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url,
            api_key,
            http,
        })
    }

    async fn fetch_current(
        &self,
        query: &[(&str, &str)],
    ) -> Result<WeatherSnapshot, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(snapshot_from_response(parsed))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        tracing::debug!(lat = %lat, lon = %lon, "fetching current weather by coordinates");

        self.fetch_current(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("units", "metric"),
            ("APPID", self.api_key.as_str()),
        ])
        .await
    }

    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(city, "fetching current weather by city name");

        self.fetch_current(&[
            ("q", city),
            ("units", "metric"),
            ("APPID", self.api_key.as_str()),
        ])
        .await
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    /// Metres; the snapshot rounds this to kilometres.
    #[serde(default)]
    visibility: f64,
    wind: OwWind,
}

fn snapshot_from_response(parsed: OwCurrentResponse) -> WeatherSnapshot {
    let (condition, icon_id) = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.icon))
        .unwrap_or_default();

    let icon = IconCategory::from_condition(&condition);

    WeatherSnapshot {
        city: parsed.name,
        country: parsed.sys.country,
        temperature_c: parsed.main.temp.round() as i32,
        temperature_f: fahrenheit_from_celsius(parsed.main.temp),
        humidity_pct: parsed.main.humidity,
        visibility_km: (parsed.visibility / 1000.0).round() as i32,
        wind_speed: parsed.wind.speed.round() as i32,
        condition,
        icon_id,
        icon,
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
