use actix_web::{delete, get, post, web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use crate::dashboard::{chart, ChartParam, DashboardError, DashboardView, Notice};
use crate::manager_mock::models::{HourlyResponse, RecommendResponse};
use crate::manager_mock::{hourly_for, recommend_for, weather_for};
use crate::AppState;

#[derive(Deserialize, Debug)]
struct CityParams {
    city: String,
}

/// Dashboard refreshes accept a missing city so it can be reported as a validation warning
#[derive(Deserialize, Debug)]
struct RefreshParams {
    #[serde(default)]
    city: String,
}

#[derive(Deserialize, Debug)]
struct ChartParams {
    #[serde(default)]
    param: ChartParam,
}

#[derive(Serialize)]
struct Cities {
    cities: Vec<String>,
}

/// Registers the mock provider and dashboard routes
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(weather)
        .service(recommend)
        .service(hourly)
        .service(cities)
        .service(current_view)
        .service(refresh)
        .service(clear)
        .service(forecast_chart);
}

#[get("/weather")]
async fn weather(params: web::Query<CityParams>) -> impl Responder {
    info!("{:?}", params);
    HttpResponse::Ok().json(weather_for(&params.city))
}

#[get("/recommend")]
async fn recommend(params: web::Query<CityParams>) -> impl Responder {
    info!("{:?}", params);
    HttpResponse::Ok().json(RecommendResponse { recommendations: recommend_for(&params.city) })
}

#[get("/hourly")]
async fn hourly(params: web::Query<CityParams>) -> impl Responder {
    info!("{:?}", params);
    HttpResponse::Ok().json(HourlyResponse {
        city: params.city.to_lowercase(),
        hourly: hourly_for(&params.city),
    })
}

#[get("/cities")]
async fn cities(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(Cities { cities: data.catalogue.names() })
}

#[get("/dashboard")]
async fn current_view(data: web::Data<AppState>) -> impl Responder {
    let view = data.view.lock().await;
    HttpResponse::Ok().json(&*view)
}

#[post("/dashboard/refresh")]
async fn refresh(params: web::Query<RefreshParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    // one refresh at a time, the view itself is only locked for the swap
    let _refresh = data.refresh.lock().await;

    let outcome = match data.catalogue.validate(&params.city) {
        Ok(city) => data.provider
            .fetch(&city.name)
            .await
            .map(|snapshot| DashboardView::build(city, snapshot))
            .map_err(DashboardError::from),
        Err(e) => Err(e),
    };

    let mut view = data.view.lock().await;
    let (next, notice) = std::mem::take(&mut *view).refreshed(outcome);
    *view = next;

    match notice {
        None => HttpResponse::Ok().json(&*view),
        Some(n @ Notice::Warning(_)) => {
            warn!("refresh rejected: {:?}", n);
            HttpResponse::BadRequest().json(n)
        },
        Some(n @ Notice::Error(_)) => {
            error!("refresh failed: {:?}", n);
            HttpResponse::BadGateway().json(n)
        },
    }
}

#[delete("/dashboard")]
async fn clear(data: web::Data<AppState>) -> impl Responder {
    let mut view = data.view.lock().await;
    *view = std::mem::take(&mut *view).cleared();
    info!("dashboard cleared");

    HttpResponse::Ok().json(&*view)
}

#[get("/dashboard/chart")]
async fn forecast_chart(params: web::Query<ChartParams>, data: web::Data<AppState>) -> impl Responder {
    let view = data.view.lock().await;

    match view.view() {
        Some(v) => HttpResponse::Ok().json(chart(&v.series, params.param)),
        None => HttpResponse::NotFound().finish(),
    }
}
