use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::condition::{ForecastCondition, VisualCategory, classify};

/// Current conditions for one location, normalized from a single provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Short label, e.g. "Rain".
    pub condition_label: String,
    /// Longer text, e.g. "light rain".
    pub condition_description: String,
}

impl CurrentWeather {
    pub fn category(&self) -> VisualCategory {
        classify(&self.condition_label)
    }
}

/// One day of the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub humidity_pct: f64,
    pub condition: ForecastCondition,
}

impl ForecastEntry {
    /// ISO calendar date, `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Forecast entries keyed by date. Keys are unique; iteration is in date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    entries: BTreeMap<NaiveDate, ForecastEntry>,
}

impl ForecastSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced for the same date.
    pub fn insert(&mut self, entry: ForecastEntry) -> Option<ForecastEntry> {
        self.entries.insert(entry.date, entry)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ForecastEntry> {
        self.entries.get(&date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForecastEntry> {
        self.entries.values()
    }
}

impl FromIterator<ForecastEntry> for ForecastSet {
    fn from_iter<I: IntoIterator<Item = ForecastEntry>>(iter: I) -> Self {
        let mut set = ForecastSet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}
