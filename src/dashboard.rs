use std::fmt;
use serde::{Deserialize, Serialize};
use crate::classifier::{classify_tier, pin_color_for, representative_temperature, summarize, OutfitTier, PinColor, WeatherSummary};
use crate::initialization::CityConfig;
use crate::manager_provider::errors::ProviderError;
use crate::models::{HourlyPoint, HourlySeries, OutfitRecommendation, ProviderSnapshot};

#[derive(Debug)]
pub enum DashboardError {
    Validation(String),
    Provider(ProviderError),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DashboardError::Validation(e) => write!(f, "DashboardError::Validation: {}", e),
            DashboardError::Provider(e) => write!(f, "DashboardError::Provider: {}", e),
        }
    }
}
impl From<ProviderError> for DashboardError {
    fn from(e: ProviderError) -> Self { DashboardError::Provider(e) }
}

/// Known cities with their map coordinates
pub struct CityCatalogue {
    cities: Vec<CityConfig>,
}

impl CityCatalogue {
    pub fn new(cities: Vec<CityConfig>) -> Self {
        Self { cities }
    }

    /// Validates a user supplied city before anything is fetched for it
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, case-insensitive
    pub fn validate(&self, city: &str) -> Result<&CityConfig, DashboardError> {
        let wanted = city.trim();
        if wanted.is_empty() {
            return Err(DashboardError::Validation("Please select a city".to_string()));
        }

        self.cities
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashboardError::Validation(format!("Unsupported city: {}", wanted)))
    }

    /// City names, title cased, in catalogue order
    pub fn names(&self) -> Vec<String> {
        self.cities.iter().map(|c| title_case(&c.name)).collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

/// The four formatted summary card values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cards {
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
    pub rain: String,
}

impl From<&WeatherSummary> for Cards {
    fn from(s: &WeatherSummary) -> Self {
        Cards {
            temperature: s.temperature.display("°C"),
            wind: s.wind.display(" km/h"),
            humidity: s.humidity.display("%"),
            rain: s.rain.display("%"),
        }
    }
}

/// Everything the rendering surface needs for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub city: String,
    pub country: String,
    pub coords: Coords,
    pub tier: Option<OutfitTier>,
    pub pin_color: Option<PinColor>,
    pub summary: WeatherSummary,
    pub cards: Cards,
    pub label: Option<String>,
    pub series: HourlySeries,
    pub outfit: OutfitRecommendation,
}

impl DashboardView {
    /// Builds the view for a validated city from a normalized provider snapshot
    ///
    /// # Arguments
    ///
    /// * 'city' - catalogue entry the snapshot was fetched for
    /// * 'snapshot' - normalized provider data
    pub fn build(city: &CityConfig, snapshot: ProviderSnapshot) -> Self {
        let summary = summarize(&snapshot.readings);
        let tier = representative_temperature(&snapshot.readings).map(classify_tier);

        DashboardView {
            city: title_case(&city.name),
            country: city.country.clone(),
            coords: Coords { lat: city.lat, lon: city.lon },
            tier,
            pin_color: tier.map(pin_color_for),
            cards: Cards::from(&summary),
            summary,
            label: snapshot.label,
            series: snapshot.series,
            outfit: snapshot.outfit,
        }
    }
}

/// User visible message produced by a state transition
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// What is currently on display. Transitions consume the old value and return a new one.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "view", rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Empty,
    Loaded(Box<DashboardView>),
}

impl ViewState {
    /// Applies the outcome of a refresh.
    ///
    /// A fresh view replaces whatever was shown. On failure the previous state is kept
    /// visible and a notice describing the failure is returned alongside it.
    ///
    /// # Arguments
    ///
    /// * 'outcome' - the view built for the requested city, or why it could not be built
    pub fn refreshed(self, outcome: Result<DashboardView, DashboardError>) -> (ViewState, Option<Notice>) {
        match outcome {
            Ok(view) => (ViewState::Loaded(Box::new(view)), None),
            Err(DashboardError::Validation(msg)) => (self, Some(Notice::Warning(msg))),
            Err(DashboardError::Provider(e)) => (self, Some(Notice::Error(format!("Something went wrong: {}", e)))),
        }
    }

    pub fn cleared(self) -> ViewState {
        ViewState::Empty
    }

    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            ViewState::Loaded(v) => Some(v.as_ref()),
            ViewState::Empty => None,
        }
    }
}

/// Forecast parameter that can be charted
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartParam {
    #[default]
    Temperature,
    Humidity,
    Rain,
    Wind,
}

impl ChartParam {
    pub fn unit(&self) -> &'static str {
        match self {
            ChartParam::Temperature => "°C",
            ChartParam::Humidity => "%",
            ChartParam::Rain => "%",
            ChartParam::Wind => "km/h",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub hour: String,
    pub value: f64,
}

/// Data for the forecast line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub param: ChartParam,
    pub unit: &'static str,
    pub domain: Option<(f64, f64)>,
    pub points: Vec<ChartPoint>,
}

const CHART_PADDING: f64 = 2.0;

/// Extracts one parameter from the hourly series for charting.
///
/// Points keep series order and hours without a value are skipped. The y domain pads the
/// observed range by 2 on both ends.
///
/// # Arguments
///
/// * 'series' - hourly forecast
/// * 'param' - parameter to chart
pub fn chart(series: &[HourlyPoint], param: ChartParam) -> Chart {
    let points: Vec<ChartPoint> = series
        .iter()
        .filter_map(|p| {
            let value = match param {
                ChartParam::Temperature => p.temperature,
                ChartParam::Humidity => p.humidity,
                ChartParam::Rain => p.rain,
                ChartParam::Wind => p.wind,
            };
            value.map(|value| ChartPoint { hour: p.hour.clone(), value })
        })
        .collect();

    let domain = points.iter().fold(None, |acc: Option<(f64, f64)>, p| match acc {
        Some((lo, hi)) => Some((lo.min(p.value), hi.max(p.value))),
        None => Some((p.value, p.value)),
    }).map(|(lo, hi)| (lo - CHART_PADDING, hi + CHART_PADDING));

    Chart { param, unit: param.unit(), domain, points }
}

fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
