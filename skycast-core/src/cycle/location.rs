use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::{
    location::LocationSource,
    model::{Coordinates, FALLBACK_COORDINATES, WeatherSnapshot},
    provider::WeatherProvider,
};

/// How often the cycle re-fetches weather for the known coordinates.
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(600_000);

/// Rendering phase of the location cycle.
///
/// `Loading` until the first successful fetch, `Ready` from then on; a later
/// fetch error never reverts to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationPhase {
    #[default]
    Loading,
    Ready,
}

/// One-time user-facing notice about geolocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Position lookup was denied or failed; the fallback coordinates are in use.
    LocationAccessDenied,
    /// No geolocation capability exists at all; nothing will be fetched.
    GeolocationUnavailable,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LocationAccessDenied => {
                "Location access is unavailable; showing weather for the fallback location. \
                 Allow location access to see real-time weather where you are."
            }
            Notice::GeolocationUnavailable => "Geolocation not available",
        }
    }
}

/// State owned by the location cycle, read by the renderer.
#[derive(Debug, Clone, Default)]
pub struct LocationState {
    pub phase: LocationPhase,
    /// Most recently known position; refresh ticks reuse it.
    pub coordinates: Option<Coordinates>,
    pub snapshot: Option<WeatherSnapshot>,
    /// Set when the latest fetch failed; the previous snapshot is retained.
    pub fetch_failed: bool,
    pub notice: Option<Notice>,
}

/// Location-weather controller: geolocate once, fetch, then re-fetch on a
/// fixed interval until deactivated.
#[derive(Debug)]
pub struct LocationCycle {
    provider: Arc<dyn WeatherProvider>,
    source: Option<Arc<dyn LocationSource>>,
    state: LocationState,
}

impl LocationCycle {
    /// `source: None` models a platform with no geolocation capability at all.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        source: Option<Arc<dyn LocationSource>>,
    ) -> Self {
        Self {
            provider,
            source,
            state: LocationState::default(),
        }
    }

    pub fn state(&self) -> &LocationState {
        &self.state
    }

    /// First transition: resolve a position and fetch weather for it.
    ///
    /// A failed position lookup falls back to [`FALLBACK_COORDINATES`] and
    /// records a notice; a missing capability records a notice and fetches
    /// nothing.
    pub async fn activate(&mut self) {
        let Some(source) = self.source.clone() else {
            self.state.notice = Some(Notice::GeolocationUnavailable);
            return;
        };

        let coords = match source.locate().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!(error = %err, "geolocation failed, using fallback coordinates");
                self.state.notice = Some(Notice::LocationAccessDenied);
                FALLBACK_COORDINATES
            }
        };

        self.fetch(coords).await;
    }

    /// Timer body: re-fetch with the most recently known coordinates.
    pub async fn tick(&mut self) {
        if let Some(coords) = self.state.coordinates {
            self.fetch(coords).await;
        }
    }

    async fn fetch(&mut self, coords: Coordinates) {
        self.state.coordinates = Some(coords);

        match self.provider.current_by_coords(coords).await {
            Ok(snapshot) => {
                self.state.snapshot = Some(snapshot);
                self.state.phase = LocationPhase::Ready;
                self.state.fetch_failed = false;
            }
            Err(err) => {
                // Best effort: keep the previous snapshot, try again next tick.
                tracing::warn!(error = %err, "weather refresh failed, keeping previous snapshot");
                self.state.fetch_failed = true;
            }
        }
    }

    /// Activate the cycle and keep it refreshing every `refresh_every` on a
    /// background task. State updates are published through the returned
    /// handle; dropping into [`LocationCycleHandle::deactivate`] stops the
    /// loop before its next fetch.
    pub fn spawn(mut self, refresh_every: Duration) -> LocationCycleHandle {
        let (state_tx, state_rx) = watch::channel(self.state.clone());
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            self.activate().await;
            let _ = state_tx.send(self.state.clone());

            let mut ticker = time::interval(refresh_every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // An interval's first tick completes immediately; activation
            // already fetched, so consume it.
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        self.tick().await;
                        let _ = state_tx.send(self.state.clone());
                    }
                }
            }
        });

        LocationCycleHandle {
            state_rx,
            cancel,
            task,
        }
    }
}

/// Handle to a running location cycle.
#[derive(Debug)]
pub struct LocationCycleHandle {
    state_rx: watch::Receiver<LocationState>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl LocationCycleHandle {
    pub fn state(&self) -> watch::Receiver<LocationState> {
        self.state_rx.clone()
    }

    /// Stop the refresh loop. After this returns, no further fetch is issued
    /// and no state is written.
    pub async fn deactivate(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
