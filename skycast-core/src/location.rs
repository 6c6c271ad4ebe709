//! Geolocation: where the dashboard learns the device's position.
//!
//! The live implementation asks an IP geolocation endpoint; the trait is the
//! seam the cycles depend on, so tests and other frontends can substitute
//! their own source.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{error::LocationError, model::Coordinates};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default IP geolocation endpoint. Free, no API key required.
pub const IP_API_URL: &str = "http://ip-api.com/json";

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    /// Resolve the device's current position.
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Approximates the device position from its public IP address.
#[derive(Debug, Clone)]
pub struct IpLocationSource {
    http: Client,
    base_url: String,
}

impl IpLocationSource {
    pub fn new() -> Result<Self, LocationError> {
        Self::with_base_url(IP_API_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base_url })
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[async_trait]
impl LocationSource for IpLocationSource {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let res = self.http.get(&self.base_url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::Lookup(format!(
                "geolocation endpoint returned status {status}"
            )));
        }

        let parsed: IpApiResponse = res
            .json()
            .await
            .map_err(|err| LocationError::Lookup(format!("invalid geolocation response: {err}")))?;

        if parsed.status != "success" {
            return Err(LocationError::Lookup(
                parsed.message.unwrap_or_else(|| "lookup refused".to_string()),
            ));
        }

        tracing::debug!(lat = parsed.lat, lon = parsed.lon, "resolved device position");

        Ok(Coordinates {
            latitude: parsed.lat,
            longitude: parsed.lon,
        })
    }
}
