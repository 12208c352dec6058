use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{
    condition::ForecastCondition,
    error::{FetchError, truncate_body},
    model::{ForecastEntry, ForecastSet},
};

use super::ForecastProvider;

const PROVIDER: &str = "forecast";

pub const DEFAULT_ENDPOINT: &str = "https://weather-app-tr3b.onrender.com/predict";

/// Client for the prediction backend. The backend owns the location; callers
/// only supply the date the forecast starts from.
#[derive(Debug, Clone)]
pub struct ForecastBackend {
    endpoint: String,
    http: Client,
}

impl ForecastBackend {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    date: String,
}

#[derive(Debug, Deserialize)]
struct PredictDay {
    temperature: f64,
    precipitation: f64,
    humidity: f64,
    condition: String,
}

fn parse_forecast(days: BTreeMap<String, PredictDay>) -> Result<ForecastSet, FetchError> {
    let mut set = ForecastSet::new();

    for (key, day) in days {
        let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d").map_err(|e| {
            FetchError::shape(PROVIDER, format!("invalid forecast date '{key}': {e}"))
        })?;
        // "2024-5-1" parses to the same day as "2024-05-01"; only the
        // zero-padded spelling is accepted so no two keys can merge.
        if date.format("%Y-%m-%d").to_string() != key {
            return Err(FetchError::shape(
                PROVIDER,
                format!("non-canonical forecast date '{key}', expected YYYY-MM-DD"),
            ));
        }
        let condition = ForecastCondition::try_from(day.condition.as_str())
            .map_err(|e| FetchError::shape(PROVIDER, format!("{key}: {e}")))?;

        let entry = ForecastEntry {
            date,
            temperature_c: day.temperature,
            precipitation_mm: day.precipitation,
            humidity_pct: day.humidity,
            condition,
        };
        if set.insert(entry).is_some() {
            return Err(FetchError::shape(
                PROVIDER,
                format!("duplicate forecast date '{key}'"),
            ));
        }
    }

    Ok(set)
}

#[async_trait]
impl ForecastProvider for ForecastBackend {
    #[tracing::instrument(name = "fetch_forecast", level = "debug", skip(self))]
    async fn fetch_forecast(&self, reference_date: NaiveDate) -> Result<ForecastSet, FetchError> {
        let request = PredictRequest {
            date: reference_date.format("%Y-%m-%d").to_string(),
        };

        let res = self
            .http
            .post(&self.endpoint)
            .json(&request)
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

        let days: BTreeMap<String, PredictDay> = serde_json::from_str(&body)
            .map_err(|e| FetchError::shape(PROVIDER, format!("invalid forecast JSON: {e}")))?;

        let forecast = parse_forecast(days)?;
        tracing::debug!(days = forecast.len(), "forecast received");

        Ok(forecast)
    }
}
