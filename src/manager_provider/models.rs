use std::collections::BTreeMap;
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull, OneOrMany};
use crate::models::HourlyPoint;

/// Response of the `/predict` endpoint.
///
/// Every key may be missing or null. Measurements come either as a single number or as
/// one number per hour, both decode into a vector. Nulls inside a vector keep their slot,
/// nulls inside the clothes mapping mark an absent entry.
#[serde_as]
#[derive(Deserialize, Debug, Default)]
pub struct PredictResponse {
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub temperature: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub temperature_min: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub temperature_max: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub rain: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub humidity: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    #[serde(default)]
    pub wind: Vec<Option<f64>>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub time: Vec<HourlyPoint>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub recommended_clothes: BTreeMap<String, Option<String>>,
}

#[derive(Deserialize, Debug)]
pub struct SplitWeather {
    pub temperature: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SplitRecommend {
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct SplitHourly {
    #[serde(default)]
    pub hourly: Vec<HourlyPoint>,
}
