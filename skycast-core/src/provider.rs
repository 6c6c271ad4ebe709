use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, WeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Read-only weather source, keyed either by coordinates or by city name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_by_coords(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherSnapshot, WeatherError>;

    async fn current_by_city(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}

/// Construct the provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key."
        )
    })?;

    let provider = OpenWeatherProvider::new(config.base_url.clone(), api_key.to_owned())?;
    Ok(provider)
}
