use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;

use crate::{constants::START_TIME, repositories::user::UserRepository, AppState};

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    database: String,
    version: String,
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = match state.auth_handler.user_repo.check_connection().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            format!("error: {}", e)
        }
    };

    let uptime_seconds = (Utc::now() - *START_TIME).num_seconds().max(0) as u64;

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "Ok".to_string(),
        uptime: format_duration(Duration::from_secs(uptime_seconds)).to_string(),
        timestamp: Utc::now().to_rfc3339(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
