pub mod models;

use chrono::{DateTime, Local, Timelike};
use rand::Rng;
use crate::classifier::{classify_tier, OutfitTier};
use crate::manager_mock::models::WeatherResponse;
use crate::models::{HourlyPoint, HourlySeries};

/// Number of points in a synthesized hourly forecast
pub const HOURLY_POINTS: usize = 12;

const DEFAULT_TEMPERATURE: f64 = 20.0;
const DEFAULT_LABEL: &str = "Moderate";

/// Returns the fixed mock weather for a city, cities not in the table get a moderate default
///
/// # Arguments
///
/// * 'city' - city name, case-insensitive
pub fn weather_for(city: &str) -> WeatherResponse {
    let (temperature, label) = match city.trim().to_lowercase().as_str() {
        "london" => (13.0, "Cool and cloudy"),
        "athens" => (25.0, "Warm and sunny"),
        "osaka" => (18.0, "Mild with light breeze"),
        _ => (DEFAULT_TEMPERATURE, DEFAULT_LABEL),
    };

    WeatherResponse { temperature, label: label.to_string() }
}

/// Returns the outfit bucket for a tier
///
/// # Arguments
///
/// * 'tier' - outfit tier
pub fn outfit_for(tier: OutfitTier) -> Vec<String> {
    let items: &[&str] = match tier {
        OutfitTier::Cold => &["T-shirt", "Shorts", "Sandals", "Sunglasses"],
        OutfitTier::Mild => &["Jeans", "Sweater", "Jacket", "Sneakers"],
        OutfitTier::Warm => &["Light trousers", "Shirt", "Loafers"],
    };

    items.iter().map(|s| s.to_string()).collect()
}

/// Returns the outfit recommended for a city's mock weather
///
/// # Arguments
///
/// * 'city' - city name, case-insensitive
pub fn recommend_for(city: &str) -> Vec<String> {
    outfit_for(classify_tier(weather_for(city).temperature))
}

/// Synthesizes a twelve hour forecast around a base temperature.
///
/// Hours start at the hour of `start` and advance by one. Temperature is jittered by up to
/// 2 degrees either way, humidity lands in [60,85], rain in [0,20] and wind in [3,10].
/// This is a test fixture, not a forecast model.
///
/// # Arguments
///
/// * 'base_temperature' - temperature to jitter around
/// * 'start' - time of the first point
/// * 'rng' - random source
pub fn synthesize_hourly<R: Rng>(base_temperature: f64, start: DateTime<Local>, rng: &mut R) -> HourlySeries {
    let first_hour = start.hour() as i64;

    (0..HOURLY_POINTS as i64)
        .map(|i| {
            let hour = (first_hour + i).rem_euclid(24);
            let temperature = base_temperature + rng.gen_range(-2.0..=2.0);

            HourlyPoint {
                hour: format!("{:02}:00", hour),
                temperature: Some((temperature * 10.0).round() / 10.0),
                humidity: Some(rng.gen_range(60..=85) as f64),
                rain: Some(rng.gen_range(0..=20) as f64),
                wind: Some(rng.gen_range(3..=10) as f64),
            }
        })
        .collect()
}

/// Synthesizes the hourly forecast for a city starting at the current local hour
///
/// # Arguments
///
/// * 'city' - city name, case-insensitive
pub fn hourly_for(city: &str) -> HourlySeries {
    let base = weather_for(city).temperature;
    synthesize_hourly(base, Local::now(), &mut rand::thread_rng())
}
