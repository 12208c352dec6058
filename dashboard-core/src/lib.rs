//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Condition classification onto a closed visual vocabulary
//! - Current-weather and forecast providers
//! - The view model that coordinates both fetch lifecycles
//! - Render-ready snapshots for a presentation layer
//!
//! It is used by `dashboard-cli`, but any front end can drive a [`ViewModel`].

pub mod condition;
pub mod config;
pub mod error;
pub mod fetch_state;
pub mod model;
pub mod provider;
pub mod snapshot;
pub mod view_model;

pub use condition::{ForecastCondition, Icon, VisualCategory, classify};
pub use config::Config;
pub use error::{FailureKind, FetchError};
pub use fetch_state::{FetchState, FetchStatus, RequestToken};
pub use model::{CurrentWeather, ForecastEntry, ForecastSet};
pub use provider::{CurrentWeatherProvider, ForecastProvider, Providers, providers_from_config};
pub use snapshot::{Backdrop, CurrentPanel, DashboardSnapshot, ForecastCard};
pub use view_model::{FetchOutcome, ViewModel};
