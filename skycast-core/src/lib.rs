//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client and geolocation lookup
//! - The location-weather and city-search refresh cycles
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod cycle;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;

pub use config::Config;
pub use cycle::{
    LocationCycle, LocationCycleHandle, LocationPhase, LocationState, Notice, SearchCycle,
    SearchState,
};
pub use error::{LocationError, WeatherError};
pub use icon::{IconCategory, format_long_date};
pub use location::{IpLocationSource, LocationSource};
pub use model::{Coordinates, FALLBACK_COORDINATES, SearchError, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
