//! Render-ready view of the dashboard.
//!
//! A snapshot is plain data: every number is already rounded and formatted
//! the way the dashboard shows it, so a presenter only lays it out.

use serde::Serialize;

use crate::{
    condition::{ForecastCondition, Icon, VisualCategory},
    fetch_state::FetchStatus,
    model::{CurrentWeather, ForecastEntry},
    view_model::ViewModel,
};

/// Background treatment for the whole view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    /// Nothing has loaded yet.
    Neutral,
    Rainy,
    Cloudy,
    Clear,
}

impl From<Option<VisualCategory>> for Backdrop {
    fn from(category: Option<VisualCategory>) -> Self {
        match category {
            None => Backdrop::Neutral,
            Some(VisualCategory::Rainy) => Backdrop::Rainy,
            Some(VisualCategory::Cloudy) => Backdrop::Cloudy,
            Some(VisualCategory::Clear) => Backdrop::Clear,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPanel {
    pub location: String,
    pub temperature_c: i64,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
    pub description: String,
    pub category: VisualCategory,
    pub icon: Icon,
}

impl From<&CurrentWeather> for CurrentPanel {
    fn from(current: &CurrentWeather) -> Self {
        let category = current.category();
        let temperature_c = round_half_up(current.temperature_c);

        CurrentPanel {
            location: current.location_name.clone(),
            temperature_c,
            temperature: format!("{temperature_c}°C"),
            humidity: format!("{}%", current.humidity_pct),
            wind: format!("{} m/s", current.wind_speed_mps),
            description: current.condition_description.clone(),
            category,
            icon: category.icon(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    pub date_key: String,
    /// Short en-GB label, e.g. "Wed 1 May".
    pub date_label: String,
    pub condition: ForecastCondition,
    pub icon: Icon,
    pub temperature: String,
    pub precipitation: String,
    pub humidity: String,
}

impl From<&ForecastEntry> for ForecastCard {
    fn from(entry: &ForecastEntry) -> Self {
        ForecastCard {
            date_key: entry.date_key(),
            date_label: entry.date.format("%a %-d %b").to_string(),
            condition: entry.condition,
            icon: entry.condition.icon(),
            temperature: format!("{}°C", round_half_up(entry.temperature_c)),
            precipitation: format!("{:.1} mm", entry.precipitation_mm),
            humidity: format!("{}%", round_half_up(entry.humidity_pct)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Current weather request in flight.
    pub loading: bool,
    pub current_status: FetchStatus,
    pub forecast_status: FetchStatus,
    pub backdrop: Backdrop,
    /// Toggles the rain overlay.
    pub raining: bool,
    pub current: Option<CurrentPanel>,
    pub forecast_title: String,
    pub forecast: Vec<ForecastCard>,
}

impl DashboardSnapshot {
    pub fn from_view_model(vm: &ViewModel) -> Self {
        let category = vm.visual_category();

        DashboardSnapshot {
            loading: vm.current_state().is_loading(),
            current_status: vm.current_state().status(),
            forecast_status: vm.forecast_state().status(),
            backdrop: Backdrop::from(category),
            raining: category == Some(VisualCategory::Rainy),
            current: vm.current().map(CurrentPanel::from),
            forecast_title: format!("7-Day Forecast for {}", vm.forecast_location()),
            forecast: vm
                .forecast()
                .map(|set| set.iter().map(ForecastCard::from).collect())
                .unwrap_or_default(),
        }
    }
}

/// Round to the nearest whole number, halves toward positive infinity.
///
/// Shared by temperatures and humidity so every whole-number readout on the
/// dashboard follows the same rule.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn london_panel_matches_dashboard_readout() {
        let current = CurrentWeather {
            location_name: "London".into(),
            temperature_c: 14.6,
            humidity_pct: 80,
            wind_speed_mps: 3.1,
            condition_label: "Rain".into(),
            condition_description: "light rain".into(),
        };

        let panel = CurrentPanel::from(&current);

        assert_eq!(panel.location, "London");
        assert_eq!(panel.temperature_c, 15);
        assert_eq!(panel.temperature, "15°C");
        assert_eq!(panel.humidity, "80%");
        assert_eq!(panel.wind, "3.1 m/s");
        assert_eq!(panel.description, "light rain");
        assert_eq!(panel.category, VisualCategory::Rainy);
        assert_eq!(panel.icon, Icon::CloudRain);
    }

    #[test]
    fn forecast_card_formats_values() {
        let entry = ForecastEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"),
            temperature_c: 21.4,
            precipitation_mm: 0.0,
            humidity_pct: 40.0,
            condition: ForecastCondition::Sunny,
        };

        let card = ForecastCard::from(&entry);

        assert_eq!(card.date_key, "2024-05-01");
        assert_eq!(card.date_label, "Wed 1 May");
        assert_eq!(card.temperature, "21°C");
        assert_eq!(card.precipitation, "0.0 mm");
        assert_eq!(card.humidity, "40%");
        assert_eq!(card.icon, Icon::Sun);
    }

    #[test]
    fn forecast_humidity_rounds_half_up_like_temperature() {
        let entry = ForecastEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 2).expect("valid date"),
            temperature_c: 18.5,
            precipitation_mm: 1.0,
            humidity_pct: 82.5,
            condition: ForecastCondition::Cloudy,
        };

        let card = ForecastCard::from(&entry);

        assert_eq!(card.temperature, "19°C");
        assert_eq!(card.humidity, "83%");
    }

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_half_up(14.5), 15);
        assert_eq!(round_half_up(14.49), 14);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-0.4), 0);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn backdrop_is_neutral_without_data() {
        assert_eq!(Backdrop::from(None), Backdrop::Neutral);
        assert_eq!(Backdrop::from(Some(VisualCategory::Cloudy)), Backdrop::Cloudy);
    }
}
