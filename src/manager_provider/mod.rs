pub mod errors;
pub mod models;

use std::collections::BTreeMap;
use std::time::Duration;
use log::{info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use crate::manager_provider::errors::ProviderError;
use crate::manager_provider::models::{PredictResponse, SplitHourly, SplitRecommend, SplitWeather};
use crate::models::{OutfitRecommendation, ProviderSnapshot, WeatherReading};

/// Wire contract spoken by the configured provider
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// Single `/predict` endpoint returning weather, hourly series and outfit in one document
    Predict,
    /// Separate `/weather`, `/recommend` and `/hourly` endpoints
    Split,
}

/// Struct for fetching weather and outfit data from a remote provider
pub struct ProviderClient {
    client: Client,
    base_url: String,
    contract: Contract,
}

impl ProviderClient {
    /// Returns a ProviderClient ready for fetching from the given provider
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme, host and optional path prefix of the provider
    /// * 'contract' - which wire contract the provider speaks
    /// * 'timeout' - request timeout
    pub fn new(base_url: &str, contract: Contract, timeout: Duration) -> Result<ProviderClient, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            contract,
        })
    }

    /// Fetches weather and outfit data for a city and normalizes it into a snapshot
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, sent lowercased
    pub async fn fetch(&self, city: &str) -> Result<ProviderSnapshot, ProviderError> {
        let city = city.trim().to_lowercase();
        info!("fetching {:?} data for {}", self.contract, city);

        match self.contract {
            Contract::Predict => {
                let predict: PredictResponse = self.get_json("predict", &city).await?;
                Ok(from_predict(predict))
            },
            Contract::Split => {
                let weather: SplitWeather = self.get_json("weather", &city).await?;
                let recommend: SplitRecommend = self.get_json("recommend", &city).await?;
                let hourly = match self.get_json::<SplitHourly>("hourly", &city).await {
                    Ok(h) => Some(h),
                    Err(e) => {
                        warn!("hourly forecast unavailable for {}: {}", city, e);
                        None
                    }
                };
                Ok(from_split(weather, recommend, hourly))
            },
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self.client
            .get(url)
            .query(&[("city", city)])
            .send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let json = res.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Normalizes a `/predict` document.
///
/// Measurement vectors are zipped by position into readings, a shorter vector or a null
/// slot simply leaves that field empty in the affected readings. Null clothes entries are
/// dropped.
///
/// # Arguments
///
/// * 'predict' - decoded response
pub fn from_predict(predict: PredictResponse) -> ProviderSnapshot {
    let len = [
        predict.temperature.len(),
        predict.temperature_min.len(),
        predict.temperature_max.len(),
        predict.humidity.len(),
        predict.wind.len(),
        predict.rain.len(),
    ].into_iter().max().unwrap_or(0);

    let readings = (0..len)
        .map(|i| WeatherReading {
            temperature: predict.temperature.get(i).copied().flatten(),
            temperature_min: predict.temperature_min.get(i).copied().flatten(),
            temperature_max: predict.temperature_max.get(i).copied().flatten(),
            humidity: predict.humidity.get(i).copied().flatten(),
            wind: predict.wind.get(i).copied().flatten(),
            rain: predict.rain.get(i).copied().flatten(),
        })
        .collect();

    let clothes: BTreeMap<String, String> = predict.recommended_clothes
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();

    ProviderSnapshot {
        readings,
        series: predict.time,
        outfit: OutfitRecommendation::from_mapping(&clothes),
        label: None,
    }
}

/// Normalizes the three split endpoint responses
///
/// # Arguments
///
/// * 'weather' - `/weather` response
/// * 'recommend' - `/recommend` response
/// * 'hourly' - `/hourly` response if it could be fetched
pub fn from_split(weather: SplitWeather, recommend: SplitRecommend, hourly: Option<SplitHourly>) -> ProviderSnapshot {
    ProviderSnapshot {
        readings: vec![WeatherReading::with_temperature(weather.temperature)],
        series: hourly.map(|h| h.hourly).unwrap_or_default(),
        outfit: OutfitRecommendation::from_labels(&recommend.recommendations),
        label: weather.label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str, contract: Contract) -> ProviderClient {
        ProviderClient::new(uri, contract, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_predict_scalars_and_arrays() {
        let predict: PredictResponse = serde_json::from_value(serde_json::json!({
            "temperature": [10.0, 20.0],
            "temperature_max": 22.0,
            "humidity": null,
            "time": [{"hour": "09:00", "temperature": 10.0}],
            "recommended_clothes": {"top": "Shirt", "top_link": "https://shop.example/shirt.png"}
        })).unwrap();

        let snapshot = from_predict(predict);

        assert_eq!(snapshot.readings.len(), 2);
        assert_eq!(snapshot.readings[0].temperature_max, Some(22.0));
        assert_eq!(snapshot.readings[1].temperature_max, None);
        assert!(snapshot.readings.iter().all(|r| r.humidity.is_none()));
        assert_eq!(snapshot.series.len(), 1);
        assert_eq!(snapshot.series[0].hour, "09:00");
        assert_eq!(snapshot.outfit.labels(), vec!["Shirt"]);
    }

    #[test]
    fn test_predict_null_slots_keep_positions() {
        let predict: PredictResponse = serde_json::from_value(serde_json::json!({
            "temperature": [18.0, null, 20.0],
            "humidity": [null, 70.0, 80.0]
        })).unwrap();

        let snapshot = from_predict(predict);

        assert_eq!(snapshot.readings.len(), 3);
        assert_eq!(snapshot.readings[0].temperature, Some(18.0));
        assert_eq!(snapshot.readings[1].temperature, None);
        assert_eq!(snapshot.readings[1].humidity, Some(70.0));
        assert_eq!(snapshot.readings[2].temperature, Some(20.0));
        assert_eq!(snapshot.readings[0].humidity, None);
    }

    #[test]
    fn test_predict_null_clothes_entries_are_dropped() {
        let predict: PredictResponse = serde_json::from_value(serde_json::json!({
            "temperature": 18.0,
            "recommended_clothes": {"top": "Shirt", "top_link": null, "shoes": null}
        })).unwrap();

        let snapshot = from_predict(predict);

        assert_eq!(snapshot.readings[0].temperature, Some(18.0));
        assert_eq!(snapshot.outfit.labels(), vec!["Shirt"]);
        assert_eq!(snapshot.outfit.items[0].link, None);
    }

    #[tokio::test]
    async fn test_fetch_predict_with_nulls_renders_other_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temperature": [18.0, null, 20.0],
                "wind": 4.0,
                "recommended_clothes": {"top": "Shirt", "top_link": null}
            })))
            .mount(&mock_server)
            .await;

        let snapshot = client(&mock_server.uri(), Contract::Predict).fetch("berlin").await.unwrap();

        assert_eq!(snapshot.readings.len(), 3);
        assert_eq!(snapshot.readings[0].wind, Some(4.0));
        assert_eq!(snapshot.outfit.labels(), vec!["Shirt"]);
    }

    #[test]
    fn test_predict_missing_keys_default() {
        let predict: PredictResponse = serde_json::from_str("{}").unwrap();
        let snapshot = from_predict(predict);

        assert!(snapshot.readings.is_empty());
        assert!(snapshot.series.is_empty());
        assert!(snapshot.outfit.items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_predict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/predict"))
            .and(query_param("city", "porto"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temperature": 18.5,
                "temperature_min": 14.0,
                "temperature_max": 21.0,
                "rain": 10.0,
                "humidity": 70.0,
                "wind": 12.0,
                "time": [],
                "recommended_clothes": {"shoes": "Sneakers"}
            })))
            .mount(&mock_server)
            .await;

        let snapshot = client(&mock_server.uri(), Contract::Predict).fetch("Porto").await.unwrap();

        assert_eq!(snapshot.readings.len(), 1);
        assert_eq!(snapshot.readings[0].temperature, Some(18.5));
        assert_eq!(snapshot.readings[0].wind, Some(12.0));
        assert_eq!(snapshot.outfit.labels(), vec!["Sneakers"]);
    }

    #[tokio::test]
    async fn test_fetch_split() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("city", "london"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temperature": 13, "label": "Cool and cloudy"
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recommend"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "recommendations": ["Jeans", "Sweater"]
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/hourly"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "city": "london",
                "hourly": [
                    {"hour": "10:00", "temperature": 12.5, "humidity": 70, "rain": 5, "wind": 4},
                    {"hour": "11:00", "temperature": 13.1, "humidity": 72, "rain": 0, "wind": 6}
                ]
            })))
            .mount(&mock_server)
            .await;

        let snapshot = client(&mock_server.uri(), Contract::Split).fetch("London").await.unwrap();

        assert_eq!(snapshot.readings, vec![WeatherReading::with_temperature(13.0)]);
        assert_eq!(snapshot.label.as_deref(), Some("Cool and cloudy"));
        assert_eq!(snapshot.series.len(), 2);
        assert_eq!(snapshot.series[1].hour, "11:00");
        assert_eq!(snapshot.outfit.labels(), vec!["Jeans", "Sweater"]);
    }

    #[tokio::test]
    async fn test_split_without_hourly_still_succeeds() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"temperature": 20})))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/recommend"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"recommendations": []})))
            .mount(&mock_server)
            .await;

        let snapshot = client(&mock_server.uri(), Contract::Split).fetch("osaka").await.unwrap();

        assert!(snapshot.series.is_empty());
        assert_eq!(snapshot.label, None);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), Contract::Predict).fetch("berlin").await;

        assert!(matches!(result, Err(ProviderError::Status(503))));
    }

    #[tokio::test]
    async fn test_garbage_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server.uri(), Contract::Predict).fetch("berlin").await;

        assert!(matches!(result, Err(ProviderError::Document(_))));
    }
}
