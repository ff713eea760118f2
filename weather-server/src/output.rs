//! Human-readable rendering for the one-shot commands.

use weather_core::{CitySuggestion, WeatherObservation};

pub fn observation(obs: &WeatherObservation) -> String {
    format!(
        "{}, {} ({})\n  {}\n  Temperature: {:.1} °C\n  Humidity:    {}%\n  Wind:        {:.1} m/s",
        obs.city,
        obs.country,
        obs.date.format("%Y-%m-%d"),
        obs.description,
        obs.temperature,
        obs.humidity,
        obs.wind_speed,
    )
}

pub fn forecast(days: &[WeatherObservation]) -> String {
    let Some(first) = days.first() else {
        return "No forecast data.".to_string();
    };

    let mut out = format!("{}, {}", first.city, first.country);
    for day in days {
        out.push_str(&format!(
            "\n  {}  {:>5.1} °C  {:>3}%  {:>4.1} m/s  {}",
            day.date.format("%a %d %b"),
            day.temperature,
            day.humidity,
            day.wind_speed,
            day.description,
        ));
    }
    out
}

pub fn suggestions(list: &[CitySuggestion]) -> String {
    list.iter()
        .map(|c| format!("{}, {}", c.name, c.country))
        .collect::<Vec<_>>()
        .join("\n")
}
