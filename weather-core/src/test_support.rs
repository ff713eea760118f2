//! Provider payloads and doubles shared by the unit tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{
    cache::CacheStore,
    error::WeatherError,
    model::ForecastDays,
    provider::WeatherProvider,
};

/// Trimmed `current.json` response for London.
pub fn london_current(wind_kph: f64) -> Value {
    json!({
        "location": {
            "name": "London",
            "region": "City of London, Greater London",
            "country": "United Kingdom",
            "lat": 51.52,
            "lon": -0.11,
            "tz_id": "Europe/London",
            "localtime_epoch": 1705329000,
            "localtime": "2024-01-15 14:30"
        },
        "current": {
            "last_updated_epoch": 1705328100,
            "last_updated": "2024-01-15 14:15",
            "temp_c": 11.0,
            "temp_f": 51.8,
            "is_day": 1,
            "condition": { "text": "Partly cloudy", "icon": "//cdn.weatherapi.com/x.png", "code": 1003 },
            "wind_mph": 11.2,
            "wind_kph": wind_kph,
            "humidity": 82,
            "feelslike_c": 8.9
        }
    })
}

/// Three-day `forecast.json` response for London, days deliberately out of order.
pub fn london_forecast() -> Value {
    json!({
        "location": {
            "name": "London",
            "country": "United Kingdom",
            "localtime": "2024-01-15 14:30"
        },
        "current": { "temp_c": 11.0 },
        "forecast": {
            "forecastday": [
                {
                    "date": "2024-01-16",
                    "day": {
                        "avgtemp_c": 5.1,
                        "avghumidity": 80.5,
                        "maxwind_kph": 18.0,
                        "condition": { "text": "Overcast" }
                    }
                },
                {
                    "date": "2024-01-15",
                    "day": {
                        "avgtemp_c": 7.4,
                        "avghumidity": 85,
                        "maxwind_kph": 25.2,
                        "condition": { "text": "Patchy rain possible" }
                    }
                },
                {
                    "date": "2024-01-17",
                    "day": {
                        "avgtemp_c": 2.0,
                        "avghumidity": 71,
                        "maxwind_kph": 9.0,
                        "condition": { "text": "Sunny" }
                    }
                }
            ]
        }
    })
}

/// Provider double returning canned payloads and counting calls.
#[derive(Debug)]
pub struct FakeProvider {
    pub current: Result<Value, String>,
    pub forecast: Result<Value, String>,
    pub search: Result<Value, String>,
    pub calls: AtomicUsize,
    pub last_days: Mutex<Option<ForecastDays>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            current: Ok(london_current(18.0)),
            forecast: Ok(london_forecast()),
            search: Ok(json!([])),
            calls: AtomicUsize::new(0),
            last_days: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, canned: &Result<Value, String>) -> Result<Value, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        canned.clone().map_err(WeatherError::Transport)
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn current(&self, _location: &str) -> Result<Value, WeatherError> {
        self.answer(&self.current)
    }

    async fn forecast(&self, _location: &str, days: ForecastDays) -> Result<Value, WeatherError> {
        *self.last_days.lock().unwrap() = Some(days);
        self.answer(&self.forecast)
    }

    async fn search(&self, _query: &str) -> Result<Value, WeatherError> {
        self.answer(&self.search)
    }
}

/// Cache double whose every operation fails.
#[derive(Debug, Default)]
pub struct BrokenCache {
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

#[async_trait]
impl CacheStore for BrokenCache {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn set(&self, _key: &str, _value: String) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("connection refused"))
    }
}
