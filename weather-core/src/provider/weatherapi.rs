use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt;

use crate::{error::WeatherError, model::ForecastDays};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

/// Client for the WeatherAPI.com REST API.
#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

// Keeps the API key out of logs.
impl fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                WeatherError::Transport(format!(
                    "failed to send request to WeatherAPI.com ({endpoint}): {}",
                    e.without_url()
                ))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            WeatherError::Transport(format!(
                "failed to read WeatherAPI {endpoint} response body: {}",
                e.without_url()
            ))
        })?;

        if !status.is_success() {
            return Err(WeatherError::Transport(format!(
                "WeatherAPI {endpoint} request failed with status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!(
                "WeatherAPI {endpoint} returned invalid JSON ({e}): {}",
                truncate_body(&body)
            ))
        })
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, location: &str) -> Result<Value, WeatherError> {
        self.fetch("current.json", &[("q", location)]).await
    }

    async fn forecast(&self, location: &str, days: ForecastDays) -> Result<Value, WeatherError> {
        let days = days.to_string();
        self.fetch("forecast.json", &[("q", location), ("days", days.as_str())]).await
    }

    async fn search(&self, query: &str) -> Result<Value, WeatherError> {
        self.fetch("search.json", &[("q", query)]).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
