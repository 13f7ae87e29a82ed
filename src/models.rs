use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// One set of simultaneous weather measurements.
///
/// Every measurement is optional since providers supply different subsets, a reading
/// carrying only a temperature is perfectly valid.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub humidity: Option<f64>,
    pub wind: Option<f64>,
    pub rain: Option<f64>,
}

impl WeatherReading {
    /// Returns a reading holding only a temperature
    ///
    /// # Arguments
    ///
    /// * 'temperature' - temperature in Celsius
    pub fn with_temperature(temperature: f64) -> Self {
        Self { temperature: Some(temperature), ..Self::default() }
    }
}

/// One hour of a forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub hour: String,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub rain: Option<f64>,
    #[serde(default)]
    pub wind: Option<f64>,
}

/// Chronologically ordered forecast points
pub type HourlySeries = Vec<HourlyPoint>;

/// A single recommended garment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitItem {
    pub category: Option<String>,
    pub label: String,
    pub link: Option<String>,
}

/// Recommended outfit, one item per category
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct OutfitRecommendation {
    pub items: Vec<OutfitItem>,
}

const LINK_SUFFIX: &str = "_link";

impl OutfitRecommendation {
    /// Builds a recommendation from a category to label mapping.
    ///
    /// Keys ending in `_link` are never treated as categories, their value is attached as the
    /// link of the category they prefix. A link without a matching category is dropped.
    ///
    /// # Arguments
    ///
    /// * 'mapping' - category name to product label, plus optional `<category>_link` entries
    pub fn from_mapping(mapping: &BTreeMap<String, String>) -> Self {
        let items = mapping
            .iter()
            .filter(|(key, _)| !key.ends_with(LINK_SUFFIX))
            .map(|(category, label)| OutfitItem {
                category: Some(category.clone()),
                label: label.clone(),
                link: mapping.get(&format!("{}{}", category, LINK_SUFFIX)).cloned(),
            })
            .collect();

        Self { items }
    }

    /// Builds a recommendation from a plain list of labels
    ///
    /// # Arguments
    ///
    /// * 'labels' - product labels, order is kept
    pub fn from_labels(labels: &[String]) -> Self {
        let items = labels
            .iter()
            .map(|label| OutfitItem { category: None, label: label.clone(), link: None })
            .collect();

        Self { items }
    }

    /// Labels in recommendation order
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }
}

/// Canonical result of one provider round trip, whatever wire contract supplied it
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProviderSnapshot {
    pub readings: Vec<WeatherReading>,
    pub series: HourlySeries,
    pub outfit: OutfitRecommendation,
    pub label: Option<String>,
}
