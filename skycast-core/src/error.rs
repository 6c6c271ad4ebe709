use reqwest::StatusCode;

/// Weather fetch errors, for either cycle.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("weather service responded with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Geolocation errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("location service unavailable")]
    ServiceUnavailable,
    #[error("location request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("location lookup failed: {0}")]
    Lookup(String),
}
