use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt};

use crate::error::WeatherError;

/// Normalized weather for one location on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub city: String,
    pub country: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: String,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Metres per second.
    pub wind_speed: f64,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub country: String,
}

/// Number of forecast days the proxy accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastDays {
    One,
    #[default]
    Three,
    Seven,
}

impl ForecastDays {
    pub const fn get(self) -> u32 {
        match self {
            ForecastDays::One => 1,
            ForecastDays::Three => 3,
            ForecastDays::Seven => 7,
        }
    }

    pub const fn all() -> &'static [ForecastDays] {
        &[ForecastDays::One, ForecastDays::Three, ForecastDays::Seven]
    }
}

impl fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl TryFrom<u32> for ForecastDays {
    type Error = WeatherError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ForecastDays::One),
            3 => Ok(ForecastDays::Three),
            7 => Ok(ForecastDays::Seven),
            _ => Err(WeatherError::InvalidInput(
                "Forecast days must be 1, 3, or 7.".to_string(),
            )),
        }
    }
}
