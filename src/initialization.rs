use std::{env, fs};
use log::info;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_provider::Contract;

const CONFIG_ENV: &str = "WEARCAST_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct ProviderParameters {
    pub base_url: String,
    pub contract: Contract,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: String,
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CityConfig {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub web_server: WebServerParameters,
    pub provider: ProviderParameters,
    pub general: General,
    #[serde(default = "default_cities")]
    pub cities: Vec<CityConfig>,
}

fn default_timeout() -> u64 { 10 }

/// Cities offered when the config file lists none
pub fn default_cities() -> Vec<CityConfig> {
    [
        ("berlin", "Germany", 52.5200, 13.4050),
        ("london", "United Kingdom", 51.5074, -0.1278),
        ("porto", "Portugal", 41.1579, -8.6291),
        ("marseille", "France", 43.2965, 5.3698),
    ]
        .into_iter()
        .map(|(name, country, lat, lon)| CityConfig {
            name: name.to_string(),
            country: country.to_string(),
            lat,
            lon,
        })
        .collect()
}

/// Loads the configuration file and sets up logging.
///
/// The path is taken from the first command line argument, then from the `WEARCAST_CONFIG`
/// environment variable, and finally defaults to `config.toml`.
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;
    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;
    info!("configuration loaded from {}", config_path);

    Ok(config)
}

/// Reads and parses a configuration file
///
/// # Arguments
///
/// * 'config_path' - path to the TOML file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    parse_config(&toml)
}

fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.cities.is_empty() {
        return Err(ConfigError::from("at least one city must be configured"));
    }

    Ok(config)
}
