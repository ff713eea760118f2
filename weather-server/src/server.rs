//! HTTP surface of the proxy.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use weather_core::{
    CitySuggestion, Config, ErrorKind, ForecastDays, WeatherError, WeatherObservation,
    WeatherService,
};

use crate::cli::build_service;

#[derive(Clone)]
pub struct AppState {
    pub service: WeatherService,
}

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Error returned by route handlers: a status and a client-safe message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    /// Map a service error to a response. Server-side failures use the
    /// fixed `server_detail` so provider internals never reach the client.
    fn from_weather(err: WeatherError, server_detail: &str) -> Self {
        match err.kind() {
            ErrorKind::Server => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: server_detail.to_string(),
            },
            ErrorKind::Client => Self { status: StatusCode::BAD_REQUEST, detail: err.to_string() },
            ErrorKind::NotFound => Self { status: StatusCode::NOT_FOUND, detail: err.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

pub fn router(service: WeatherService) -> Router {
    Router::new()
        .route("/weather/:location", get(current_weather))
        .route("/forecast/:location", get(forecast))
        .route("/suggestions/:query", get(suggestions))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { service })
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;

    tracing::info!(
        addr = %config.server.listen_addr,
        cache = %config.cache.backend,
        ttl_secs = config.cache.ttl_secs,
        "Weather proxy listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Weather proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

/// GET /weather/:location - current conditions for a city name or "lat,lon".
async fn current_weather(
    State(state): State<AppState>,
    Path(location): Path<String>,
) -> Result<Json<WeatherObservation>, ApiError> {
    state
        .service
        .current_weather(&location)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_weather(e, "Unable to fetch weather data from API."))
}

/// GET /forecast/:location?days=N - N is 1, 3 (default) or 7.
async fn forecast(
    State(state): State<AppState>,
    Path(location): Path<String>,
    params: Result<Query<ForecastParams>, QueryRejection>,
) -> Result<Json<Vec<WeatherObservation>>, ApiError> {
    let Query(params) = params.map_err(|rejection| ApiError {
        status: StatusCode::BAD_REQUEST,
        detail: rejection.body_text(),
    })?;
    let days = params.days.unwrap_or(ForecastDays::default().get());

    state
        .service
        .forecast(&location, days)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_weather(e, "Unable to fetch forecast data from API."))
}

/// GET /suggestions/:query - city names matching free text.
async fn suggestions(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<CitySuggestion>>, ApiError> {
    state
        .service
        .suggestions(&query)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_weather(e, "Unable to fetch city suggestions."))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
