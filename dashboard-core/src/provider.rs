use crate::{
    Config, CurrentWeather, ForecastSet,
    error::FetchError,
    provider::{forecast::ForecastBackend, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{fmt::Debug, sync::Arc};

pub mod forecast;
pub mod openweather;

/// Source of current conditions, queried by free-text location.
#[async_trait]
pub trait CurrentWeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, location: &str) -> Result<CurrentWeather, FetchError>;
}

/// Source of the multi-day forecast for the backend's fixed location.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, reference_date: NaiveDate) -> Result<ForecastSet, FetchError>;
}

/// The pair of providers a dashboard is mounted with.
#[derive(Debug, Clone)]
pub struct Providers {
    pub current: Arc<dyn CurrentWeatherProvider>,
    pub forecast: Arc<dyn ForecastProvider>,
}

/// Construct both providers from config.
pub fn providers_from_config(config: &Config) -> anyhow::Result<Providers> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for the current-weather provider.\n\
             Hint: run `weather-dash configure` or set OPENWEATHERMAP_API_KEY."
        )
    })?;

    let current = OpenWeatherProvider::new(api_key.to_owned(), config.current_endpoint.clone());
    let forecast = ForecastBackend::new(config.forecast_endpoint.clone());

    Ok(Providers {
        current: Arc::new(current),
        forecast: Arc::new(forecast),
    })
}
