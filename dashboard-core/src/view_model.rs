//! # View model
//!
//! Owns the fetch lifecycle of both data sources and is the single source of
//! truth the presentation layer reads from.
//!
//! ```text
//! mount ──► spawn current fetch ─┐
//!       └─► spawn forecast fetch ─┤ FetchOutcome (mpsc)
//! search ─► spawn current fetch ─┘        │
//!                                         ▼
//!                              apply() ──► Source<T>
//! ```
//!
//! Fetches run as independent tasks and report back over a channel; they
//! share no state with each other or with the view model. Every outcome
//! carries the token it was issued with and is dropped on arrival if a newer
//! request for the same source has been issued since.

use std::future::Future;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::{
    condition::VisualCategory,
    error::FetchError,
    fetch_state::{FetchState, RequestToken, Source},
    model::{CurrentWeather, ForecastSet},
    provider::Providers,
    snapshot::DashboardSnapshot,
};

/// Result of one spawned fetch, delivered back to the view model.
#[derive(Debug)]
pub enum FetchOutcome {
    Current {
        token: RequestToken,
        query: String,
        result: Result<CurrentWeather, FetchError>,
    },
    Forecast {
        token: RequestToken,
        result: Result<ForecastSet, FetchError>,
    },
}

#[derive(Debug)]
pub struct ViewModel {
    providers: Providers,
    forecast_location: String,
    current: Source<CurrentWeather>,
    forecast: Source<ForecastSet>,
    last_query: Option<String>,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl ViewModel {
    pub fn new(providers: Providers, forecast_location: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            providers,
            forecast_location: forecast_location.into(),
            current: Source::default(),
            forecast: Source::default(),
            last_query: None,
            tx,
            rx,
        }
    }

    /// Start both fetches concurrently.
    pub fn mount(&mut self, location: &str, today: NaiveDate) {
        tracing::debug!(location, %today, "mounting dashboard");
        self.spawn_current(location.trim().to_string());
        self.spawn_forecast(today);
    }

    /// Re-fetch current weather for `query`. Blank queries are ignored and
    /// return `None`.
    pub fn submit_search(&mut self, query: &str) -> Option<RequestToken> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty search");
            return None;
        }
        Some(self.spawn_current(query.to_string()))
    }

    /// Repeat the most recent current-weather query, if there was one.
    pub fn refresh_current(&mut self) -> Option<RequestToken> {
        let query = self.last_query.clone()?;
        Some(self.spawn_current(query))
    }

    pub fn refresh_forecast(&mut self, today: NaiveDate) -> RequestToken {
        self.spawn_forecast(today)
    }

    fn spawn_current(&mut self, query: String) -> RequestToken {
        let token = self.current.begin();
        self.last_query = Some(query.clone());

        let provider = self.providers.current.clone();
        let tx = self.tx.clone();
        tracing::debug!(?token, query = %query, "requesting current weather");

        tokio::spawn(async move {
            let call_query = query.clone();
            let result = guarded("current weather", async move {
                provider.fetch_current(&call_query).await
            })
            .await;
            let _ = tx.send(FetchOutcome::Current {
                token,
                query,
                result,
            });
        });

        token
    }

    fn spawn_forecast(&mut self, today: NaiveDate) -> RequestToken {
        let token = self.forecast.begin();

        let provider = self.providers.forecast.clone();
        let tx = self.tx.clone();
        tracing::debug!(?token, %today, "requesting forecast");

        tokio::spawn(async move {
            let result =
                guarded("forecast", async move { provider.fetch_forecast(today).await }).await;
            let _ = tx.send(FetchOutcome::Forecast { token, result });
        });

        token
    }

    /// Fold a finished fetch into state. Returns `false` for stale outcomes.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match outcome {
            FetchOutcome::Current {
                token,
                query,
                result,
            } => {
                if let Err(e) = &result {
                    if self.current.is_current(token) {
                        tracing::warn!(query = %query, kind = ?e.kind(), "current weather fetch failed: {e}");
                    }
                }
                let applied = self.current.resolve(token, result);
                if applied {
                    tracing::info!(query = %query, status = ?self.current.state().status(), "current weather updated");
                } else {
                    tracing::debug!(?token, query = %query, "discarding stale current weather response");
                }
                applied
            }
            FetchOutcome::Forecast { token, result } => {
                if let Err(e) = &result {
                    if self.forecast.is_current(token) {
                        tracing::warn!(kind = ?e.kind(), "forecast fetch failed: {e}");
                    }
                }
                let applied = self.forecast.resolve(token, result);
                if applied {
                    tracing::info!(status = ?self.forecast.state().status(), "forecast updated");
                } else {
                    tracing::debug!(?token, "discarding stale forecast response");
                }
                applied
            }
        }
    }

    /// Wait for the next fetch to finish and apply it.
    pub async fn pump(&mut self) -> bool {
        match self.rx.recv().await {
            Some(outcome) => self.apply(outcome),
            None => false,
        }
    }

    /// Wait for the next outcome that changes state.
    ///
    /// Stale outcomes are absorbed. Returns `false` once nothing is loading,
    /// so a presenter can redraw after every `true`.
    pub async fn next_update(&mut self) -> bool {
        while self.is_busy() {
            if self.pump().await {
                return true;
            }
        }
        false
    }

    /// Pump until neither source is loading.
    pub async fn settle(&mut self) {
        while self.next_update().await {}
    }

    pub fn is_busy(&self) -> bool {
        self.current.state().is_loading() || self.forecast.state().is_loading()
    }

    pub fn current_state(&self) -> &FetchState<CurrentWeather> {
        self.current.state()
    }

    pub fn forecast_state(&self) -> &FetchState<ForecastSet> {
        self.forecast.state()
    }

    /// Last good current weather, still shown after a failed refresh.
    pub fn current(&self) -> Option<&CurrentWeather> {
        self.current.last_good()
    }

    pub fn forecast(&self) -> Option<&ForecastSet> {
        self.forecast.last_good()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn forecast_location(&self) -> &str {
        &self.forecast_location
    }

    /// `None` until current weather has loaded at least once.
    pub fn visual_category(&self) -> Option<VisualCategory> {
        self.current().map(CurrentWeather::category)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::from_view_model(self)
    }
}

/// Run a provider call on its own task so that a panic inside the provider
/// still produces a result for the waiting fetch task.
async fn guarded<T, F>(provider: &'static str, call: F) -> Result<T, FetchError>
where
    T: Send + 'static,
    F: Future<Output = Result<T, FetchError>> + Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(provider, "fetch task ended early: {e}");
            Err(FetchError::aborted(provider, e.to_string()))
        }
    }
}
