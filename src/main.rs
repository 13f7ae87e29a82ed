mod classifier;
mod dashboard;
mod errors;
mod handlers;
mod initialization;
mod logging;
mod manager_mock;
mod manager_provider;
mod models;

use std::time::Duration;
use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::info;
use crate::dashboard::{CityCatalogue, ViewState};
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_provider::ProviderClient;

pub struct AppState {
    provider: ProviderClient,
    catalogue: CityCatalogue,
    refresh: Mutex<()>,
    view: Mutex<ViewState>,
}

impl AppState {
    pub fn new(provider: ProviderClient, catalogue: CityCatalogue) -> Self {
        Self { provider, catalogue, refresh: Mutex::new(()), view: Mutex::new(ViewState::Empty) }
    }
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let provider = ProviderClient::new(
        &config.provider.base_url,
        config.provider.contract,
        Duration::from_secs(config.provider.timeout_secs),
    )?;
    let state = web::Data::new(AppState::new(provider, CityCatalogue::new(config.cities)));

    info!("serving on {}:{}, provider {} ({:?})",
        config.web_server.bind_address, config.web_server.bind_port,
        config.provider.base_url, config.provider.contract);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::routes)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
