use std::sync::Arc;

use crate::{
    model::{SearchError, WeatherSnapshot},
    provider::WeatherProvider,
};

/// State owned by the search cycle: at most one of snapshot or error is
/// present at any time. The fields stay private so the invariant can only
/// move through [`SearchState::resolve`] and [`SearchState::reject`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    snapshot: Option<WeatherSnapshot>,
    error: Option<SearchError>,
}

impl SearchState {
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    fn resolve(&mut self, snapshot: WeatherSnapshot) {
        self.snapshot = Some(snapshot);
        self.error = None;
    }

    fn reject(&mut self, error: SearchError) {
        self.snapshot = None;
        self.error = Some(error);
    }
}

/// City-search controller: a mutable query string and an explicit-trigger
/// search against the weather provider.
#[derive(Debug)]
pub struct SearchCycle {
    provider: Arc<dyn WeatherProvider>,
    default_city: String,
    query: String,
    state: SearchState,
}

impl SearchCycle {
    pub fn new(provider: Arc<dyn WeatherProvider>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
            query: String::new(),
            state: SearchState::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Startup transition: one search for the default city, independent of
    /// user input.
    pub async fn activate(&mut self) {
        let city = self.default_city.clone();
        self.search(city).await;
    }

    /// Enter key while the field has focus: searches whatever the query holds.
    pub async fn submit(&mut self) {
        let city = self.query.clone();
        self.search(city).await;
    }

    /// Click on the search icon. An empty query triggers no request.
    pub async fn click(&mut self) {
        if self.query.is_empty() {
            return;
        }
        let city = self.query.clone();
        self.search(city).await;
    }

    /// Search for `city`. Success replaces any error with the snapshot,
    /// failure replaces any snapshot with a "Not Found" record; the query
    /// string is cleared either way.
    pub async fn search(&mut self, city: String) {
        self.query.clear();

        match self.provider.current_by_city(&city).await {
            Ok(snapshot) => self.state.resolve(snapshot),
            Err(err) => {
                tracing::debug!(error = %err, city = %city, "city search failed");
                self.state.reject(SearchError::not_found(city));
            }
        }
    }
}
