use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{FetchError, truncate_body},
    model::CurrentWeather,
};

use super::CurrentWeatherProvider;

const PROVIDER: &str = "openweather";

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http: Client::new(),
        }
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
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition_label, condition_description) = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

        CurrentWeather {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition_label,
            condition_description,
        }
    }
}

#[async_trait]
impl CurrentWeatherProvider for OpenWeatherProvider {
    #[tracing::instrument(name = "fetch_current", level = "debug", skip(self))]
    async fn fetch_current(&self, location: &str) -> Result<CurrentWeather, FetchError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::network(PROVIDER, e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::network(PROVIDER, e))?;

        if !status.is_success() {
            return Err(FetchError::shape(
                PROVIDER,
                format!("status {}: {}", status, truncate_body(&body)),
            ));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::shape(PROVIDER, format!("invalid current weather JSON: {e}")))?;

        tracing::debug!(location = %parsed.name, "current weather received");

        Ok(parsed.into())
    }
}
