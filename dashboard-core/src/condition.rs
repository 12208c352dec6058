//! Mapping of raw condition text onto the dashboard's closed visual vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual category derived from a free-text condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualCategory {
    Rainy,
    Cloudy,
    Clear,
}

impl VisualCategory {
    pub fn icon(self) -> Icon {
        match self {
            VisualCategory::Rainy => Icon::CloudRain,
            VisualCategory::Cloudy => Icon::Cloud,
            VisualCategory::Clear => Icon::Sun,
        }
    }
}

/// Classify a provider condition label.
///
/// Matching is a case-insensitive substring test: "rain" wins over "cloud",
/// anything else (including the empty string) is `Clear`.
pub fn classify(raw_label: &str) -> VisualCategory {
    let label = raw_label.to_lowercase();

    if label.contains("rain") {
        VisualCategory::Rainy
    } else if label.contains("cloud") {
        VisualCategory::Cloudy
    } else {
        VisualCategory::Clear
    }
}

/// Condition tag carried by a forecast entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastCondition {
    Sunny,
    Cloudy,
    Raining,
}

impl ForecastCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastCondition::Sunny => "sunny",
            ForecastCondition::Cloudy => "cloudy",
            ForecastCondition::Raining => "raining",
        }
    }

    pub const fn all() -> &'static [ForecastCondition] {
        &[
            ForecastCondition::Sunny,
            ForecastCondition::Cloudy,
            ForecastCondition::Raining,
        ]
    }

    pub fn icon(self) -> Icon {
        match self {
            ForecastCondition::Sunny => Icon::Sun,
            ForecastCondition::Cloudy => Icon::Cloud,
            ForecastCondition::Raining => Icon::CloudRain,
        }
    }

    /// Same category space as [`classify`], without any substring logic.
    pub fn category(self) -> VisualCategory {
        match self {
            ForecastCondition::Sunny => VisualCategory::Clear,
            ForecastCondition::Cloudy => VisualCategory::Cloudy,
            ForecastCondition::Raining => VisualCategory::Rainy,
        }
    }
}

impl fmt::Display for ForecastCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl TryFrom<&str> for ForecastCondition {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "sunny" => Ok(ForecastCondition::Sunny),
            "cloudy" => Ok(ForecastCondition::Cloudy),
            "raining" => Ok(ForecastCondition::Raining),
            other => Err(format!(
                "unknown forecast condition '{other}', expected one of: sunny, cloudy, raining"
            )),
        }
    }
}

/// Icon identifier handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sun,
    Cloud,
    CloudRain,
}

impl Icon {
    /// Icon for a raw forecast tag. Unrecognized tags fall back to [`Icon::Sun`].
    pub fn from_forecast_tag(tag: &str) -> Self {
        ForecastCondition::try_from(tag)
            .map(ForecastCondition::icon)
            .unwrap_or(Icon::Sun)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::Cloud => "cloud",
            Icon::CloudRain => "cloud-rain",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
