use std::fmt;
use serde::{Serialize, Serializer};
use crate::models::WeatherReading;

/// Discrete temperature bucket driving both pin color and outfit selection
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutfitTier {
    Cold,
    Mild,
    Warm,
}

/// Map pin color handed to the map renderer
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinColor {
    Blue,
    Green,
    Orange,
}

/// Classifies a temperature into an outfit tier.
///
/// Below 15 is cold, 15 to 20 inclusive is mild and above 20 is warm. NaN compares false
/// on both edges and lands in mild.
///
/// # Arguments
///
/// * 'temperature' - representative temperature in Celsius
pub fn classify_tier(temperature: f64) -> OutfitTier {
    if temperature < 15.0 {
        OutfitTier::Cold
    } else if temperature > 20.0 {
        OutfitTier::Warm
    } else {
        OutfitTier::Mild
    }
}

/// Returns the map pin color for a tier
///
/// # Arguments
///
/// * 'tier' - outfit tier
pub fn pin_color_for(tier: OutfitTier) -> PinColor {
    match tier {
        OutfitTier::Cold => PinColor::Blue,
        OutfitTier::Mild => PinColor::Green,
        OutfitTier::Warm => PinColor::Orange,
    }
}

/// A single aggregate, or the "not available" sentinel when nothing was measured
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stat {
    Available(f64),
    NotAvailable,
}

impl Stat {
    pub fn value(&self) -> Option<f64> {
        match self {
            Stat::Available(v) => Some(*v),
            Stat::NotAvailable => None,
        }
    }

    /// Formats the stat for a summary card, "N/A" when not available
    ///
    /// # Arguments
    ///
    /// * 'unit' - unit suffix including any leading space, e.g. "°C" or " km/h"
    pub fn display(&self, unit: &str) -> String {
        match self {
            Stat::Available(v) => format!("{:.2}{}", v, unit),
            Stat::NotAvailable => "N/A".to_string(),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Available(v) => write!(f, "{:.2}", v),
            Stat::NotAvailable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Stat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Aggregate display statistics over a set of readings
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct WeatherSummary {
    pub temperature: Stat,
    pub wind: Stat,
    pub humidity: Stat,
    pub rain: Stat,
}

/// Aggregates readings into display statistics.
///
/// Temperature, wind and rain are arithmetic means while humidity is the median. Each field
/// is computed only over the readings that carry it and is `NotAvailable` when none do.
///
/// # Arguments
///
/// * 'readings' - readings to aggregate, may be empty
pub fn summarize(readings: &[WeatherReading]) -> WeatherSummary {
    WeatherSummary {
        temperature: mean(readings.iter().filter_map(|r| r.temperature)),
        wind: mean(readings.iter().filter_map(|r| r.wind)),
        humidity: median(readings.iter().filter_map(|r| r.humidity)),
        rain: mean(readings.iter().filter_map(|r| r.rain)),
    }
}

/// Picks the temperature used for tier classification.
///
/// The highest `temperature_max` wins. Without any maximum the mean temperature is used,
/// and without either there is nothing to classify.
///
/// # Arguments
///
/// * 'readings' - readings from one provider round trip
pub fn representative_temperature(readings: &[WeatherReading]) -> Option<f64> {
    readings
        .iter()
        .filter_map(|r| r.temperature_max)
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))))
        .or_else(|| mean(readings.iter().filter_map(|r| r.temperature)).value())
}

fn mean(values: impl Iterator<Item = f64>) -> Stat {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        Stat::NotAvailable
    } else {
        Stat::Available(sum / count as f64)
    }
}

fn median(values: impl Iterator<Item = f64>) -> Stat {
    let mut values: Vec<f64> = values.collect();
    if values.is_empty() {
        return Stat::NotAvailable;
    }
    values.sort_by(|a, b| a.total_cmp(b));

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Stat::Available((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Stat::Available(values[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn humidity(h: f64) -> WeatherReading {
        WeatherReading { humidity: Some(h), ..Default::default() }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(classify_tier(14.999), OutfitTier::Cold);
        assert_eq!(classify_tier(15.0), OutfitTier::Mild);
        assert_eq!(classify_tier(20.0), OutfitTier::Mild);
        assert_eq!(classify_tier(20.001), OutfitTier::Warm);
    }

    #[test]
    fn test_tier_extremes() {
        assert_eq!(classify_tier(-40.0), OutfitTier::Cold);
        assert_eq!(classify_tier(45.0), OutfitTier::Warm);
        assert_eq!(classify_tier(f64::NAN), OutfitTier::Mild);
    }

    #[test]
    fn test_pin_colors() {
        assert_eq!(pin_color_for(OutfitTier::Cold), PinColor::Blue);
        assert_eq!(pin_color_for(OutfitTier::Mild), PinColor::Green);
        assert_eq!(pin_color_for(OutfitTier::Warm), PinColor::Orange);
        assert_eq!(serde_json::to_value(PinColor::Orange).unwrap(), "orange");
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);

        assert_eq!(summary.temperature, Stat::NotAvailable);
        assert_eq!(summary.wind, Stat::NotAvailable);
        assert_eq!(summary.humidity, Stat::NotAvailable);
        assert_eq!(summary.rain, Stat::NotAvailable);
    }

    #[test]
    fn test_summarize_mean_temperature() {
        let readings = [WeatherReading::with_temperature(10.0), WeatherReading::with_temperature(20.0)];
        let summary = summarize(&readings);

        assert_eq!(summary.temperature, Stat::Available(15.0));
        assert_eq!(summary.humidity, Stat::NotAvailable);
    }

    #[test]
    fn test_summarize_humidity_is_median() {
        let readings = [
            humidity(10.0),
            humidity(90.0),
            humidity(20.0),
        ];

        assert_eq!(summarize(&readings).humidity, Stat::Available(20.0));
    }

    #[test]
    fn test_median_even_count() {
        let readings = [
            humidity(60.0),
            humidity(70.0),
            humidity(80.0),
            humidity(90.0),
        ];

        assert_eq!(summarize(&readings).humidity, Stat::Available(75.0));
    }

    #[test]
    fn test_representative_prefers_max() {
        let readings = [
            WeatherReading { temperature: Some(12.0), temperature_max: Some(18.0), ..Default::default() },
            WeatherReading { temperature: Some(14.0), temperature_max: Some(22.5), ..Default::default() },
        ];

        assert_eq!(representative_temperature(&readings), Some(22.5));
    }

    #[test]
    fn test_representative_falls_back_to_mean() {
        let readings = [WeatherReading::with_temperature(24.0), WeatherReading::with_temperature(26.0)];

        assert_eq!(representative_temperature(&readings), Some(25.0));
        assert_eq!(representative_temperature(&[]), None);
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(Stat::Available(15.0).display("°C"), "15.00°C");
        assert_eq!(Stat::Available(4.567).display(" km/h"), "4.57 km/h");
        assert_eq!(Stat::NotAvailable.display("%"), "N/A");
        assert_eq!(Stat::NotAvailable.to_string(), "N/A");
    }
}
