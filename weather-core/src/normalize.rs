//! Mapping from WeatherAPI.com payloads to [`WeatherObservation`] and
//! [`CitySuggestion`].
//!
//! Every payload is decoded into an explicit schema. A missing field or an
//! `{"error": {...}}` body is a [`WeatherError::MalformedResponse`]; fields we
//! do not use are ignored.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::WeatherError,
    model::{CitySuggestion, WeatherObservation},
};

/// The provider reports wind in km/h; observations carry m/s.
pub const KPH_PER_MPS: f64 = 3.6;

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
    localtime: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: f64,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

#[derive(Debug, Deserialize)]
struct WaSearchResult {
    name: String,
    country: String,
}

/// Normalize a `current.json` payload.
pub fn current_observation(payload: &Value) -> Result<WeatherObservation, WeatherError> {
    reject_error_indicator(payload)?;

    let parsed = WaCurrentResponse::deserialize(payload)
        .map_err(|e| malformed("current weather", e))?;

    let localtime = parsed.location.localtime.as_deref().ok_or_else(|| {
        WeatherError::MalformedResponse("current weather: missing location.localtime".into())
    })?;

    Ok(WeatherObservation {
        city: parsed.location.name,
        country: parsed.location.country,
        temperature: parsed.current.temp_c,
        description: parsed.current.condition.text,
        humidity: humidity_pct(parsed.current.humidity)?,
        wind_speed: kph_to_mps(parsed.current.wind_kph),
        date: local_date(localtime)?,
    })
}

/// Normalize a `forecast.json` payload into one observation per day, oldest first.
pub fn forecast_observations(payload: &Value) -> Result<Vec<WeatherObservation>, WeatherError> {
    reject_error_indicator(payload)?;

    let parsed =
        WaForecastResponse::deserialize(payload).map_err(|e| malformed("forecast", e))?;

    let WaLocation { name, country, .. } = parsed.location;

    let mut days = parsed
        .forecast
        .forecastday
        .into_iter()
        .map(|entry| {
            Ok(WeatherObservation {
                city: name.clone(),
                country: country.clone(),
                temperature: entry.day.avgtemp_c,
                description: entry.day.condition.text,
                humidity: humidity_pct(entry.day.avghumidity)?,
                wind_speed: kph_to_mps(entry.day.maxwind_kph),
                date: entry.date,
            })
        })
        .collect::<Result<Vec<_>, WeatherError>>()?;

    days.sort_by_key(|obs| obs.date);
    Ok(days)
}

/// Normalize a `search.json` payload. A `null` body counts as no results.
pub fn city_suggestions(payload: &Value) -> Result<Vec<CitySuggestion>, WeatherError> {
    if payload.is_null() {
        return Ok(Vec::new());
    }
    reject_error_indicator(payload)?;

    let results =
        Vec::<WaSearchResult>::deserialize(payload).map_err(|e| malformed("search", e))?;

    Ok(results
        .into_iter()
        .map(|r| CitySuggestion { name: r.name, country: r.country })
        .collect())
}

pub fn kph_to_mps(kph: f64) -> f64 {
    kph / KPH_PER_MPS
}

fn reject_error_indicator(payload: &Value) -> Result<(), WeatherError> {
    match payload.get("error") {
        Some(err) => {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            Err(WeatherError::MalformedResponse(format!("provider reported an error: {message}")))
        }
        None => Ok(()),
    }
}

/// `"2024-01-15 14:30"` -> 2024-01-15
fn local_date(localtime: &str) -> Result<NaiveDate, WeatherError> {
    let day = localtime.split_whitespace().next().unwrap_or_default();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| {
        WeatherError::MalformedResponse(format!("unparseable local time '{localtime}': {e}"))
    })
}

// avghumidity comes back as an integer or a float depending on the endpoint.
fn humidity_pct(value: f64) -> Result<u8, WeatherError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(WeatherError::MalformedResponse(format!(
            "humidity out of range: {value}"
        )));
    }
    Ok(value.round() as u8)
}

fn malformed(what: &str, err: serde_json::Error) -> WeatherError {
    WeatherError::MalformedResponse(format!("{what}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{london_current, london_forecast};
    use serde_json::json;

    #[test]
    fn london_current_is_normalized() {
        let obs = current_observation(&london_current(18.0)).expect("valid payload");

        assert_eq!(obs.city, "London");
        assert_eq!(obs.country, "United Kingdom");
        assert_eq!(obs.temperature, 11.0);
        assert_eq!(obs.description, "Partly cloudy");
        assert_eq!(obs.humidity, 82);
        assert!((obs.wind_speed - 18.0 / 3.6).abs() < 1e-9);
        assert_eq!(obs.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn wind_speed_is_kph_divided_by_3_6() {
        for kph in [0.0, 1.0, 3.6, 12.2, 36.0, 117.4] {
            let obs = current_observation(&london_current(kph)).unwrap();
            assert!((obs.wind_speed - kph / 3.6).abs() < 1e-9, "kph={kph}");
        }
    }

    #[test]
    fn error_indicator_is_rejected() {
        let payload = json!({
            "error": { "code": 1006, "message": "No matching location found." }
        });

        let err = current_observation(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
        assert!(err.to_string().contains("No matching location found."));

        assert!(forecast_observations(&payload).is_err());
        assert!(city_suggestions(&payload).is_err());
    }

    #[test]
    fn error_indicator_wins_even_with_valid_fields() {
        let mut payload = london_current(10.0);
        payload["error"] = json!({ "code": 9999, "message": "Internal application error." });

        assert!(matches!(
            current_observation(&payload),
            Err(WeatherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_nested_field_is_rejected() {
        let mut payload = london_current(10.0);
        payload["current"]
            .as_object_mut()
            .unwrap()
            .remove("condition");

        let err = current_observation(&payload).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[test]
    fn missing_localtime_is_rejected() {
        let mut payload = london_current(10.0);
        payload["location"].as_object_mut().unwrap().remove("localtime");

        assert!(current_observation(&payload).is_err());
    }

    #[test]
    fn garbage_localtime_is_rejected() {
        let mut payload = london_current(10.0);
        payload["location"]["localtime"] = json!("yesterday-ish");

        assert!(current_observation(&payload).is_err());
    }

    #[test]
    fn forecast_days_are_mapped_and_ordered() {
        let obs = forecast_observations(&london_forecast()).expect("valid forecast");

        assert_eq!(obs.len(), 3);
        let dates: Vec<_> = obs.iter().map(|o| o.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-15", "2024-01-16", "2024-01-17"]);

        assert!(obs.iter().all(|o| o.city == "London" && o.country == "United Kingdom"));
        assert_eq!(obs[0].temperature, 7.4);
        assert_eq!(obs[0].description, "Patchy rain possible");
        assert!((obs[0].wind_speed - 25.2 / 3.6).abs() < 1e-9);
        // 80.5 rounds up
        assert_eq!(obs[1].humidity, 81);
    }

    #[test]
    fn forecast_without_forecastday_is_rejected() {
        let payload = json!({
            "location": { "name": "London", "country": "United Kingdom" },
            "forecast": {}
        });

        assert!(matches!(
            forecast_observations(&payload),
            Err(WeatherError::MalformedResponse(_))
        ));
    }

    #[test]
    fn humidity_out_of_range_is_rejected() {
        let mut payload = london_current(10.0);
        payload["current"]["humidity"] = json!(140);

        assert!(current_observation(&payload).is_err());
    }

    #[test]
    fn suggestions_keep_provider_order() {
        let payload = json!([
            { "id": 1, "name": "Paris", "region": "Ile-de-France", "country": "France" },
            { "id": 2, "name": "Paris", "region": "Texas", "country": "United States of America" },
            { "id": 3, "name": "Parma", "region": "Emilia-Romagna", "country": "Italy" }
        ]);

        let out = city_suggestions(&payload).unwrap();
        let names: Vec<_> = out.iter().map(|c| (c.name.as_str(), c.country.as_str())).collect();
        assert_eq!(
            names,
            [
                ("Paris", "France"),
                ("Paris", "United States of America"),
                ("Parma", "Italy"),
            ]
        );
    }

    #[test]
    fn empty_and_null_search_yield_no_suggestions() {
        assert!(city_suggestions(&json!([])).unwrap().is_empty());
        assert!(city_suggestions(&Value::Null).unwrap().is_empty());
    }
}
