//! Plain-text presenter for [`DashboardSnapshot`].

use std::fmt;

use dashboard_core::{Backdrop, DashboardSnapshot, FetchStatus, Icon};

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Sun => "☀",
        Icon::Cloud => "☁",
        Icon::CloudRain => "🌧",
    }
}

fn backdrop_label(backdrop: Backdrop) -> &'static str {
    match backdrop {
        Backdrop::Neutral => "─",
        Backdrop::Rainy => "rainy",
        Backdrop::Cloudy => "cloudy",
        Backdrop::Clear => "clear",
    }
}

/// Plain-text layout of a snapshot, one line per readout.
pub struct Dashboard<'a>(pub &'a DashboardSnapshot);

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;

        writeln!(f, "══ Weather [{}] ══", backdrop_label(snapshot.backdrop))?;

        if snapshot.loading {
            writeln!(f, "Loading...")?;
        }

        match &snapshot.current {
            Some(panel) => {
                writeln!(f, "{}", panel.location)?;
                writeln!(f, "  {}  {}", glyph(panel.icon), panel.temperature)?;
                writeln!(f, "  Humidity: {}", panel.humidity)?;
                writeln!(f, "  Wind: {}", panel.wind)?;
                writeln!(f, "  Condition: {}", panel.description)?;
                if snapshot.current_status == FetchStatus::Failed {
                    writeln!(f, "  (latest search failed; showing last known conditions)")?;
                }
            }
            None if snapshot.current_status == FetchStatus::Failed => {
                writeln!(f, "No current weather available.")?;
            }
            None => {}
        }

        writeln!(f)?;
        writeln!(f, "{}", snapshot.forecast_title)?;

        if snapshot.forecast.is_empty() {
            let note = match snapshot.forecast_status {
                FetchStatus::Idle | FetchStatus::Loading => "  Loading forecast...",
                FetchStatus::Failed => "  Forecast unavailable.",
                FetchStatus::Loaded => "  No forecast entries.",
            };
            writeln!(f, "{note}")?;
        }

        for card in &snapshot.forecast {
            writeln!(
                f,
                "  {:<10} {} {:<8} Temp: {:>5}  Precip: {:>8}  Humidity: {}",
                card.date_label,
                glyph(card.icon),
                card.condition,
                card.temperature,
                card.precipitation,
                card.humidity,
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::{CurrentPanel, ForecastCard, ForecastCondition, VisualCategory};

    fn empty_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            loading: true,
            current_status: FetchStatus::Loading,
            forecast_status: FetchStatus::Loading,
            backdrop: Backdrop::Neutral,
            raining: false,
            current: None,
            forecast_title: "7-Day Forecast for Mandi".into(),
            forecast: Vec::new(),
        }
    }

    fn london_panel() -> CurrentPanel {
        CurrentPanel {
            location: "London".into(),
            temperature_c: 15,
            temperature: "15°C".into(),
            humidity: "80%".into(),
            wind: "3.1 m/s".into(),
            description: "light rain".into(),
            category: VisualCategory::Rainy,
            icon: Icon::CloudRain,
        }
    }

    #[test]
    fn loading_snapshot_shows_indicators() {
        let text = Dashboard(&empty_snapshot()).to_string();

        assert!(text.contains("Loading..."));
        assert!(text.contains("Loading forecast..."));
        assert!(text.contains("7-Day Forecast for Mandi"));
    }

    #[test]
    fn loaded_snapshot_shows_readouts() {
        let mut snapshot = empty_snapshot();
        snapshot.loading = false;
        snapshot.current_status = FetchStatus::Loaded;
        snapshot.forecast_status = FetchStatus::Loaded;
        snapshot.backdrop = Backdrop::Rainy;
        snapshot.current = Some(london_panel());
        snapshot.forecast = vec![ForecastCard {
            date_key: "2024-05-01".into(),
            date_label: "Wed 1 May".into(),
            condition: ForecastCondition::Sunny,
            icon: Icon::Sun,
            temperature: "21°C".into(),
            precipitation: "0.0 mm".into(),
            humidity: "40%".into(),
        }];

        let text = Dashboard(&snapshot).to_string();

        assert!(!text.contains("Loading"));
        assert!(text.contains("[rainy]"));
        assert!(text.contains("15°C"));
        assert!(text.contains("Humidity: 80%"));
        assert!(text.contains("Wind: 3.1 m/s"));
        assert!(text.contains("Wed 1 May"));
        assert!(text.contains("0.0 mm"));
        assert!(text.contains("sunny"));
    }

    #[test]
    fn failed_refresh_keeps_panel_with_note() {
        let mut snapshot = empty_snapshot();
        snapshot.loading = false;
        snapshot.current_status = FetchStatus::Failed;
        snapshot.forecast_status = FetchStatus::Failed;
        snapshot.current = Some(london_panel());

        let text = Dashboard(&snapshot).to_string();

        assert!(text.contains("London"));
        assert!(text.contains("showing last known conditions"));
        assert!(text.contains("Forecast unavailable."));
    }
}
